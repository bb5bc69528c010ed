use crate::domain::model::{Destination, DomainPolicy};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct PolicyRow {
    source: String,
    #[tabled(rename = "source type")]
    source_type: String,
    destination: String,
    #[tabled(rename = "destination type")]
    destination_type: String,
    protocol: String,
    ports: String,
}

impl From<&DomainPolicy> for PolicyRow {
    fn from(policy: &DomainPolicy) -> Self {
        Self {
            source: policy.source_name.clone(),
            source_type: policy
                .source_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            destination: destination_entry(&policy.destination),
            destination_type: policy.destination_type().as_str().to_string(),
            protocol: policy.protocol.clone(),
            ports: port_entry(policy.start_port, policy.end_port),
        }
    }
}

/// `""` for an unset range, `"N"` for a single port, `"start-end"` otherwise.
pub fn port_entry(start: u16, end: u16) -> String {
    if start == end {
        if start == 0 {
            String::new()
        } else {
            start.to_string()
        }
    } else {
        format!("{}-{}", start, end)
    }
}

pub fn destination_entry(destination: &Destination) -> String {
    match destination {
        Destination::App { name } => name.clone(),
        Destination::Ip { start, end } if start == end => start.clone(),
        Destination::Ip { start, end } => format!("{}-{}", start, end),
    }
}

/// Renders the listing table, header row included even when empty.
pub fn policy_table(policies: &[DomainPolicy]) -> String {
    let rows: Vec<PolicyRow> = policies.iter().map(PolicyRow::from).collect();
    Table::new(rows).with(Style::blank()).to_string()
}
