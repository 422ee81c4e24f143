use crate::error::{Error, Result};
use crate::linalg::phase::DEFAULT_DIAGONAL_THRESHOLD;
use crate::transpiler::BasisGates;
use log::info;
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "Q_DECOMP_CONFIG";

/// Tolerances and transpilation settings for the checks.
///
/// Every field is optional in the JSON form; missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Tolerance for `V² ≈ X` up to phase.
    pub square_tolerance: f64,
    /// Tolerance for `Vdg ≈ V†`, compared without phase freedom.
    pub adjoint_tolerance: f64,
    /// Tolerance for the Toffoli equivalence check.
    pub equivalence_tolerance: f64,
    /// Minimum diagonal magnitude used for phase extraction.
    pub diagonal_threshold: f64,
    /// Target basis for the decomposition.
    pub basis: Vec<String>,
    pub optimization_level: u8,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            square_tolerance: 1e-7,
            adjoint_tolerance: 1e-8,
            equivalence_tolerance: 1e-7,
            diagonal_threshold: DEFAULT_DIAGONAL_THRESHOLD,
            basis: vec!["u3".to_string(), "cx".to_string()],
            optimization_level: 0,
        }
    }
}

impl CheckConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                info!("loading config from {}", Path::new(&path).display());
                Self::from_path(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn basis_gates(&self) -> BasisGates {
        BasisGates::new(self.basis.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.square_tolerance, 1e-7);
        assert_eq!(config.adjoint_tolerance, 1e-8);
        assert_eq!(config.equivalence_tolerance, 1e-7);
        assert_eq!(config.diagonal_threshold, 1e-8);
        assert_eq!(config.optimization_level, 0);
        assert_eq!(config.basis_gates().to_string(), "[cx, u3]");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CheckConfig::from_json(r#"{ "optimization_level": 1 }"#).unwrap();
        assert_eq!(config.optimization_level, 1);
        assert_eq!(config.basis, vec!["u3", "cx"]);
        assert_eq!(config.square_tolerance, 1e-7);
    }

    #[test]
    fn test_full_json() {
        let config = CheckConfig::from_json(
            r#"{
                "square_tolerance": 1e-6,
                "adjoint_tolerance": 1e-9,
                "equivalence_tolerance": 1e-5,
                "diagonal_threshold": 1e-4,
                "basis": ["h", "t", "tdg", "cx"],
                "optimization_level": 2
            }"#,
        )
        .unwrap();
        assert_eq!(config.basis.len(), 4);
        assert_eq!(config.diagonal_threshold, 1e-4);
        assert_eq!(config.optimization_level, 2);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CheckConfig::from_json(r#"{ "tolerance": 1 }"#),
            Err(Error::ConfigParse(_))
        ));
        assert!(matches!(
            CheckConfig::from_json("not json"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = CheckConfig::from_path(Path::new("/nonexistent/q-decomp.json"));
        assert!(matches!(result, Err(Error::ConfigIo { .. })));
    }
}
