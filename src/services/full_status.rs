//! Per-copy block attached when full status display is enabled

use crate::models::item_copy::ItemCopy;

pub trait FullStatusRenderer: Send + Sync {
    fn render(&self, copies: &[ItemCopy]) -> String;
}

/// One line per copy: `location | call number | availability | due date`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFullStatusRenderer;

impl FullStatusRenderer for PlainFullStatusRenderer {
    fn render(&self, copies: &[ItemCopy]) -> String {
        copies
            .iter()
            .map(|copy| {
                let availability = if copy.availability { "available" } else { "unavailable" };
                match copy.due_date() {
                    Some(due) => format!(
                        "{} | {} | {} | {}",
                        copy.location, copy.call_number, availability, due
                    ),
                    None => format!("{} | {} | {}", copy.location, copy.call_number, availability),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lines() {
        let copies = vec![
            ItemCopy {
                location: "LS1".to_string(),
                call_number: "LS1-001".to_string(),
                availability: true,
                ..Default::default()
            },
            ItemCopy {
                location: "LBS".to_string(),
                call_number: "LBS-001".to_string(),
                due_date: Some("2024-01-01".to_string()),
                ..Default::default()
            },
        ];

        assert_eq!(
            PlainFullStatusRenderer.render(&copies),
            "LS1 | LS1-001 | available\nLBS | LBS-001 | unavailable | 2024-01-01"
        );
    }
}
