// Configuration module for reading Othello.toml
// Search depth, heuristic weight tables and tool settings live here so that
// differently tuned players are just different configurations.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub evaluation: EvaluationConfig,
    pub arena: ArenaConfig,
    pub debug: DebugConfig,
}

/// Fixed-depth search settings
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Plies searched below the root; a forced pass consumes one ply
    pub depth: u8,
    /// Disable to run plain Minimax (same decisions, more nodes)
    pub alpha_beta: bool,
}

/// Heuristic evaluation constants
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    /// Total discs at which the middle game begins
    pub middle_phase_start: usize,
    /// Total discs at which the late game begins
    pub late_phase_start: usize,
    /// Magnitude of a decided game, before the disc margin is added
    pub terminal_score: f64,
    pub early: PhaseWeights,
    pub middle: PhaseWeights,
    pub late: PhaseWeights,
}

/// Weights of the heuristic terms for one game phase
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PhaseWeights {
    pub piece_difference: f64,
    pub mobility: f64,
    pub corner: f64,
    /// Applied per X-square next to an empty corner (negative)
    pub x_square: f64,
    /// Applied per C-square next to an empty corner (negative)
    pub c_square: f64,
}

impl EvaluationConfig {
    /// Selects the weight table for a board holding `total_discs` discs
    pub fn weights_for(&self, total_discs: usize) -> &PhaseWeights {
        if total_discs < self.middle_phase_start {
            &self.early
        } else if total_discs < self.late_phase_start {
            &self.middle
        } else {
            &self.late
        }
    }
}

/// Self-play settings
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaConfig {
    pub games: usize,
    pub seed: u64,
    /// Search depth of the opponent; 0 plays uniformly random legal moves
    pub opponent_depth: u8,
    pub alternate_colors: bool,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Othello.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Othello.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Othello.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Othello.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 4,
                alpha_beta: true,
            },
            evaluation: EvaluationConfig {
                middle_phase_start: 22,
                late_phase_start: 50,
                terminal_score: 10000.0,
                // Mobility and corners first, discs barely matter
                early: PhaseWeights {
                    piece_difference: 0.25,
                    mobility: 7.5,
                    corner: 30.0,
                    x_square: -15.0,
                    c_square: -10.0,
                },
                middle: PhaseWeights {
                    piece_difference: 2.5,
                    mobility: 4.0,
                    corner: 25.0,
                    x_square: -10.0,
                    c_square: -7.0,
                },
                // Disc count dominates
                late: PhaseWeights {
                    piece_difference: 10.0,
                    mobility: 0.5,
                    corner: 15.0,
                    x_square: -2.0,
                    c_square: -1.0,
                },
            },
            arena: ArenaConfig {
                games: 20,
                seed: 42,
                opponent_depth: 0,
                alternate_colors: true,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "othello_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Othello.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.search.depth, 4);
        assert!(config.search.alpha_beta);
        assert_eq!(config.evaluation.terminal_score, 10000.0);
    }

    #[test]
    fn test_phase_selection_boundaries() {
        let eval = Config::default_hardcoded().evaluation;
        assert_eq!(eval.weights_for(4), &eval.early);
        assert_eq!(eval.weights_for(21), &eval.early);
        assert_eq!(eval.weights_for(22), &eval.middle);
        assert_eq!(eval.weights_for(49), &eval.middle);
        assert_eq!(eval.weights_for(50), &eval.late);
        assert_eq!(eval.weights_for(64), &eval.late);
    }

    #[test]
    fn test_mobility_weight_collapses_late() {
        let eval = Config::default_hardcoded().evaluation;
        assert!(eval.early.mobility > eval.middle.mobility);
        assert!(eval.middle.mobility > eval.late.mobility);
        assert!(eval.early.piece_difference < eval.middle.piece_difference);
        assert!(eval.middle.piece_difference < eval.late.piece_difference);
    }

    #[test]
    fn test_othello_toml_can_be_parsed() {
        // This test ensures Othello.toml is valid and can be parsed
        let result = Config::from_file("Othello.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Othello.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config =
            Config::from_file("Othello.toml").expect("Othello.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.search.depth, hardcoded_config.search.depth);
        assert_eq!(
            file_config.search.alpha_beta,
            hardcoded_config.search.alpha_beta
        );

        assert_eq!(
            file_config.evaluation.middle_phase_start,
            hardcoded_config.evaluation.middle_phase_start
        );
        assert_eq!(
            file_config.evaluation.late_phase_start,
            hardcoded_config.evaluation.late_phase_start
        );
        assert_eq!(
            file_config.evaluation.terminal_score,
            hardcoded_config.evaluation.terminal_score
        );
        assert_eq!(file_config.evaluation.early, hardcoded_config.evaluation.early);
        assert_eq!(
            file_config.evaluation.middle,
            hardcoded_config.evaluation.middle
        );
        assert_eq!(file_config.evaluation.late, hardcoded_config.evaluation.late);

        assert_eq!(file_config.arena.games, hardcoded_config.arena.games);
        assert_eq!(file_config.arena.seed, hardcoded_config.arena.seed);
        assert_eq!(
            file_config.arena.opponent_depth,
            hardcoded_config.arena.opponent_depth
        );

        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.evaluation.middle_phase_start, 22);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
