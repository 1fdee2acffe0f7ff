//! Game page detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// Game paths look like `/{gameId}` or `/{gameId}/white`: an identifier of
/// at least eight alphanumerics directly under the root.
static GAME_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[A-Za-z0-9]{8}").expect("valid game path pattern"));

/// Extract the game id from a location path, or `None` if the path does not
/// denote a game page. Pure function, recomputed on every navigation.
pub fn game_path(path: &str) -> Option<&str> {
    if !GAME_PATH.is_match(path) {
        return None;
    }
    path[1..].split('/').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_game_id() {
        assert_eq!(game_path("/abcd1234"), Some("abcd1234"));
    }

    #[test]
    fn test_game_id_with_color_segment() {
        assert_eq!(game_path("/abcd1234/white"), Some("abcd1234"));
    }

    #[test]
    fn test_longer_id() {
        assert_eq!(game_path("/abcd1234efgh"), Some("abcd1234efgh"));
    }

    #[test]
    fn test_root_is_not_a_game() {
        assert_eq!(game_path("/"), None);
        assert_eq!(game_path(""), None);
    }

    #[test]
    fn test_short_id_rejected() {
        assert_eq!(game_path("/abc123"), None);
    }

    #[test]
    fn test_non_alphanumeric_prefix_rejected() {
        assert_eq!(game_path("/@/someuser"), None);
    }

    #[test]
    fn test_long_word_qualifies() {
        // An 8+ letter first segment is indistinguishable from a game id;
        // the activation probe is what keeps non-game pages inert.
        assert_eq!(game_path("/broadcast"), Some("broadcast"));
    }
}
