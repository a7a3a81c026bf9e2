use serde::Serialize;

use crate::milestone::Milestone;

/// Separator between descriptions in a merged label.
pub const LABEL_SEPARATOR: &str = ";\n";

/// A run of consecutive milestones sharing one date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    pub date: String,
    pub descs: Vec<String>,
    /// Input indices of the members, ascending and contiguous.
    pub indices: Vec<usize>,
}

impl DateGroup {
    /// Index of the member whose point anchors the label.
    pub fn first_index(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn label(&self) -> String {
        self.descs.join(LABEL_SEPARATOR)
    }
}

/// Merge runs of equal adjacent dates.
///
/// Equal dates separated by another date stay in separate groups.
pub fn group_by_consecutive_date(milestones: &[Milestone]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for (index, milestone) in milestones.iter().enumerate() {
        match groups.last_mut() {
            Some(last) if last.date == milestone.date => {
                last.descs.push(milestone.desc.clone());
                last.indices.push(index);
            }
            _ => groups.push(DateGroup {
                date: milestone.date.clone(),
                descs: vec![milestone.desc.clone()],
                indices: vec![index],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn m(date: &str, desc: &str) -> Milestone {
        Milestone {
            date: date.to_string(),
            desc: desc.to_string(),
        }
    }

    fn group(date: &str, descs: &[&str], indices: &[usize]) -> DateGroup {
        DateGroup {
            date: date.to_string(),
            descs: descs.iter().map(|d| d.to_string()).collect(),
            indices: indices.to_vec(),
        }
    }

    #[test]
    fn only_adjacent_dates_merge() {
        let groups = group_by_consecutive_date(&[m("A", "x"), m("A", "y"), m("B", "z"), m("A", "w")]);
        assert_eq!(
            groups,
            vec![
                group("A", &["x", "y"], &[0, 1]),
                group("B", &["z"], &[2]),
                group("A", &["w"], &[3]),
            ]
        );
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_consecutive_date(&[]).is_empty());
    }

    #[test]
    fn dates_compare_as_strings() {
        // Same day, different spelling: not merged.
        let groups = group_by_consecutive_date(&[m("05.10", "a"), m("5.10", "b")]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn hand_built_group_without_members_has_no_anchor() {
        let empty = group("05.10", &[], &[]);
        assert_eq!(empty.first_index(), None);
        assert!(!empty.contains(0));
        assert_eq!(empty.label(), "");
    }

    #[test]
    fn label_joins_descriptions() {
        let groups = group_by_consecutive_date(&[m("05.10", "DJ at LIC"), m("05.10", "'Feeder' filming")]);
        assert_eq!(groups[0].label(), "DJ at LIC;\n'Feeder' filming");
        assert_eq!(groups[0].first_index(), Some(0));
        assert!(groups[0].contains(1));
        assert!(!groups[0].contains(2));
    }
}
