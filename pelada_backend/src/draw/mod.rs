pub mod allocation;
pub mod datastructures;

/// Fixed palette cycled by team index for the auto draw methods. Manual
/// draws carry their own colors.
pub const TEAM_COLOR_PALETTE: [&str; 8] = [
    "#F44336", "#2196F3", "#4CAF50", "#FFEB3B", "#FF9800", "#9C27B0", "#00BCD4", "#795548",
];

pub fn team_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Team {}", letter)
}

pub fn team_color(index: usize) -> &'static str {
    TEAM_COLOR_PALETTE[index % TEAM_COLOR_PALETTE.len()]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_team_names_follow_index() {
        assert_eq!(team_name(0), "Team A");
        assert_eq!(team_name(1), "Team B");
        assert_eq!(team_name(25), "Team Z");
    }

    #[test]
    fn test_team_colors_cycle_through_palette() {
        assert_eq!(team_color(0), TEAM_COLOR_PALETTE[0]);
        assert_eq!(team_color(8), TEAM_COLOR_PALETTE[0]);
        assert_eq!(team_color(9), TEAM_COLOR_PALETTE[1]);
    }
}
