//! Column group annotations.

use crate::color::Color;
use crate::error::{PlotError, Result};

/// A named, colored set of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Display name.
    pub name: String,
    /// Band and legend color.
    pub color: Color,
    /// Column indices into the main matrix, may overlap other groups.
    pub indices: Vec<usize>,
}

impl Group {
    /// Create a group.
    pub fn new(name: impl Into<String>, color: Color, indices: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            color,
            indices,
        }
    }

    /// Columns whose name contains any of `terms`, ignoring case.
    pub fn from_search<S: AsRef<str>>(
        name: impl Into<String>,
        color: Color,
        terms: &[S],
        col_names: &[String],
    ) -> Self {
        let terms: Vec<String> = terms
            .iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let indices = col_names
            .iter()
            .enumerate()
            .filter(|(_, col)| {
                let col = col.to_lowercase();
                terms.iter().any(|t| col.contains(t.as_str()))
            })
            .map(|(i, _)| i)
            .collect();

        Self::new(name, color, indices)
    }
}

/// Per-column group color, later groups overriding earlier ones.
///
/// Fails if any group references a column outside `0..cols`.
pub fn column_colors(groups: &[Group], cols: usize) -> Result<Vec<Option<Color>>> {
    let mut colors = vec![None; cols];

    for group in groups {
        for &index in &group.indices {
            let slot = colors
                .get_mut(index)
                .ok_or_else(|| PlotError::index_out_of_range(format!("group {}", group.name), index, cols))?;
            *slot = Some(group.color);
        }
    }

    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Ctrl_1", "ctrl_2", "KO_1", "KO_2", "WT"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let g = Group::from_search("control", Color::BLACK, &["CTRL"], &names());
        assert_eq!(g.indices, vec![0, 1]);

        let g = Group::from_search("mixed", Color::BLACK, &["ko", "wt", ""], &names());
        assert_eq!(g.indices, vec![2, 3, 4]);
    }

    #[test]
    fn last_group_wins_on_overlap() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let groups = vec![
            Group::new("a", red, vec![0, 1]),
            Group::new("b", blue, vec![1, 2]),
        ];

        let colors = column_colors(&groups, 4).unwrap();
        assert_eq!(colors, vec![Some(red), Some(blue), Some(blue), None]);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let groups = vec![Group::new("a", Color::BLACK, vec![5])];
        assert!(matches!(
            column_colors(&groups, 3),
            Err(PlotError::IndexOutOfRange { index: 5, len: 3, .. })
        ));
    }
}
