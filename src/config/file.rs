//! # TOML 配置文件
//!
//! ```toml
//! [paths]
//! target_dir = "targets"
//! rdf_dir = "rdfs"
//! potentials_dir = "potentials"
//! figures_dir = "figures"
//! animations_dir = "animations"
//!
//! [units]
//! to_angstrom = 6.0
//! to_kcalpermol = 0.1
//!
//! [render]
//! format = "svg"
//! width = 1200
//! height = 900
//! frame_delay_ms = 150
//!
//! [selection]
//! top_k = 5
//! marker = "npt"
//! weights = { npt_300K = 1.0, npt_400K = 2.0 }
//! ```
//!
//! 所有字段可选，未知字段报错。
//!
//! ## 依赖关系
//! - 被 `config/mod.rs` 使用
//! - 使用 `serde`, `toml`

use crate::cli::plot::ImageFormat;
use crate::error::{MsibiError, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub paths: Option<FilePathsConfig>,
    pub units: Option<FileUnitsConfig>,
    pub render: Option<FileRenderConfig>,
    pub selection: Option<FileSelectionConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilePathsConfig {
    pub target_dir: Option<PathBuf>,
    pub rdf_dir: Option<PathBuf>,
    pub potentials_dir: Option<PathBuf>,
    pub figures_dir: Option<PathBuf>,
    pub animations_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileUnitsConfig {
    pub to_angstrom: Option<f64>,
    pub to_kcalpermol: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileRenderConfig {
    pub format: Option<ImageFormat>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_delay_ms: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSelectionConfig {
    pub top_k: Option<usize>,
    pub marker: Option<String>,
    pub weights: Option<BTreeMap<String, f64>>,
}

impl FileConfig {
    /// 读取配置文件；未指定路径时返回空配置
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MsibiError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::from_toml(&content).map_err(|reason| MsibiError::ConfigError {
            path: path.display().to_string(),
            reason,
        })?;
        debug!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn paths(&self) -> FilePathsConfig {
        self.paths.clone().unwrap_or_default()
    }

    pub fn units(&self) -> FileUnitsConfig {
        self.units.clone().unwrap_or_default()
    }

    pub fn render(&self) -> FileRenderConfig {
        self.render.clone().unwrap_or_default()
    }

    pub fn selection(&self) -> FileSelectionConfig {
        self.selection.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let content = r#"
[paths]
target_dir = "ref"

[units]
to_angstrom = 3.5

[render]
format = "svg"
frame_delay_ms = 100

[selection]
marker = "prod"
weights = { prod_1 = 2.0 }
"#;
        let config = FileConfig::from_toml(content).unwrap();
        assert_eq!(config.paths().target_dir, Some(PathBuf::from("ref")));
        assert_eq!(config.units().to_angstrom, Some(3.5));
        assert_eq!(config.units().to_kcalpermol, None);
        assert_eq!(config.render().format, Some(ImageFormat::Svg));
        assert_eq!(config.selection().marker.as_deref(), Some("prod"));
        assert_eq!(config.selection().weights.unwrap()["prod_1"], 2.0);
    }

    #[test]
    fn test_empty_and_unknown_fields() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
        assert!(FileConfig::from_toml("[units]\nto_nm = 1.0\n").is_err());
        assert!(FileConfig::from_toml("[plotting]\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msibi.toml");
        fs::write(&path, "[selection]\ntop_k = 3\n").unwrap();

        let config = FileConfig::load(Some(&path)).unwrap();
        assert_eq!(config.selection().top_k, Some(3));

        fs::write(&path, "[selection]\ntop_k = \"three\"\n").unwrap();
        assert!(matches!(
            FileConfig::load(Some(&path)),
            Err(MsibiError::ConfigError { .. })
        ));
    }
}
