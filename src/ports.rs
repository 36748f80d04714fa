/**
 * ports.rs
 * Port range expander: "80,443,8000-8002" -> [80, 443, 8000, 8001, 8002]
 *
 * Components are single ports or inclusive low-high ranges. Validation is
 * strict: empty, non-numeric, and inverted components all fail before any
 * remote call is made. Duplicates are preserved; each occurrence is treated
 * independently downstream.
 */

use crate::errors::{PteroError, Result};

/// Expand a comma-separated port spec into a flat ordered port list.
pub fn expand_ports(spec: &str) -> Result<Vec<u16>> {
    let mut ports = Vec::new();

    for component in spec.split(',') {
        let component = component.trim();
        if component.is_empty() {
            return Err(PteroError::InvalidPortSpec(format!(
                "empty component in '{}'",
                spec
            )));
        }

        match component.split_once('-') {
            Some((low, high)) => {
                let low: u16 = parse_port(low, component)?;
                let high: u16 = parse_port(high, component)?;
                if low > high {
                    return Err(PteroError::InvalidPortSpec(format!(
                        "inverted range '{}'",
                        component
                    )));
                }
                ports.extend(low..=high);
            }
            None => ports.push(parse_port(component, component)?),
        }
    }

    Ok(ports)
}

fn parse_port(value: &str, component: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|_| {
        PteroError::InvalidPortSpec(format!("non-numeric component '{}'", component))
    })
}
