//! PteroNode CLI
//!
//! Command-line interface for managing panel port allocations

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pteronode::reconcile::Action;
use pteronode::{
    build_index, expand_ports, load_nodes, resolve, table, Credentials, PanelClient, Reconciler,
};

const CACAW: &str = r#"
                           <\              _
                            \\          _/{
                     _       \\       _-   -_
                   /{        / `\   _-     - -_
                 _~  =      ( @  \ -        -  -_
               _- -   ~-_   \( =\ \           -  -_
             _~  -       ~_ | 1 :\ \      _-~-_ -  -_
           _-   -          ~  |V: \ \  _-~     ~-_-  -_
        _-~   -            /  | :  \ \            ~-_- -_
     _-~    -   _.._      {   | : _-``               ~- _-_
  _-~   -__..--~    ~-_  {   : \:}
=~__.--~~              ~-_\  :  /
                           \ : /__
                          //`Y'--\\
                         <+       \\
                          \\      WWW
"#;

#[derive(Parser)]
#[command(name = "pteronode")]
#[command(version = pteronode::VERSION)]
#[command(about = "Manage your Pterodactyl allocations with ease.", long_about = None)]
struct Cli {
    /// Path to a YAML file with panel credentials
    #[arg(long, default_value = pteronode::config::DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// URL to the panel, e.g. https://panel.test.com
    #[arg(long, global = true)]
    panel: Option<String>,

    /// Application API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// CACAW
    #[arg(long, global = true, hide = true)]
    cacaw: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a list of nodes and their IDs
    Nodes,
    /// Print a list of IPs with their owning nodes
    Ips,
    /// Add or delete allocations on the selected IPs
    Modify {
        /// Allocation ranges to apply, e.g. '7777-7800,9443,25565-25585'
        #[arg(long)]
        ports: String,
        /// Comma separated list of node IDs to act on (default: all nodes)
        #[arg(long)]
        nodes: Option<String>,
        /// Comma separated list of IP addresses to act on (default: every IP
        /// on the selected nodes)
        #[arg(long)]
        ips: Option<String>,
        /// Whether to add or delete the allocations
        #[arg(long, value_enum, default_value = "add")]
        action: CliAction,
        /// Actually make changes; without this flag only a preview is printed
        #[arg(long)]
        no_dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliAction {
    Add,
    Delete,
}

impl From<CliAction> for Action {
    fn from(action: CliAction) -> Self {
        match action {
            CliAction::Add => Action::Add,
            CliAction::Delete => Action::Delete,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if cli.cacaw {
        println!("{}", CACAW);
    }

    let creds = Credentials::resolve(&cli.config, cli.panel.as_deref(), cli.api_key.as_deref())?;
    let client = PanelClient::new(&creds.panel, &creds.api_key);

    match cli.command {
        Commands::Nodes => {
            let nodes = load_nodes(&client).await?;
            println!("{}", table::nodes_table(&nodes));
        }

        Commands::Ips => {
            let nodes = load_nodes(&client).await?;
            let index = build_index(&nodes);
            println!("{}", table::ips_table(&index));
        }

        Commands::Modify {
            ports,
            nodes,
            ips,
            action,
            no_dry_run,
        } => {
            // Validate the port spec before touching the remote
            let port_list = expand_ports(&ports)?;
            let action: Action = action.into();
            let dry_run = !no_dry_run;

            let inventory = load_nodes(&client).await?;
            let index = build_index(&inventory);
            let targets = resolve(&index, &inventory, nodes.as_deref(), ips.as_deref())?;

            let interrupted = Arc::new(AtomicBool::new(false));
            {
                let flag = interrupted.clone();
                ctrlc::set_handler(move || {
                    eprintln!("Interrupt received, finishing in-flight calls");
                    flag.store(true, Ordering::SeqCst);
                })?;
            }

            let reconciler = Reconciler::new().with_interrupt(interrupted);

            if dry_run {
                let report = reconciler
                    .reconcile(&client, &index, &targets, &port_list, action, true)
                    .await;
                println!("PteroNode wants to {} the following allocations:", action);
                println!("{}", table::preview_table(&report.rows));
                println!("Run again with --no-dry-run to take this action.");
                return Ok(());
            }

            println!("PteroNode is now modifying the following allocations:");
            if action == Action::Delete {
                println!(
                    "Note: Deleting large numbers of allocations can cause rate limiting issues"
                );
            }

            let report = reconciler
                .reconcile(&client, &index, &targets, &port_list, action, false)
                .await;
            println!("{}", table::preview_table(&report.rows));

            for failure in &report.failures {
                match failure.port {
                    Some(port) => eprintln!(
                        "Failed on {} port {} (node {}): {}",
                        failure.ip, port, failure.node_id, failure.error
                    ),
                    None => eprintln!(
                        "Failed on {} (node {}): {}",
                        failure.ip, failure.node_id, failure.error
                    ),
                }
            }
            println!("{}", report.tally());

            if report.failed > 0 {
                std::process::exit(1);
            }
            println!("Done!  CACAW!");
        }
    }

    Ok(())
}
