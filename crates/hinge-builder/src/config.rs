//! TOML description of a batch of hinges.
//!
//! ```toml
//! [[hinge]]
//! name = "lid"
//! kind = "side"
//! height = 60.0
//! width = 20.0
//! offset = [15.0, 0.0, 0.0]
//! [hinge.options]
//! hinge_radius = 6.0
//!
//! [[hinge]]
//! name = "tray"
//! kind = "flat"
//! height = 12.0
//! width = 20.0
//! base_height = 2.0
//! ```

use std::collections::HashSet;

use hinge_kernel::SolidHandle;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::flat::make_flat_hinge;
use crate::kernel_ext::KernelBundle;
use crate::params::{FlatHingeOptions, SideHingeOptions};
use crate::side::make_side_hinge;
use crate::types::HingeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HingeKind {
    Side {
        #[serde(default)]
        options: SideHingeOptions,
    },
    Flat {
        base_height: f64,
        #[serde(default)]
        options: FlatHingeOptions,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HingeEntry {
    pub name: String,
    pub height: f64,
    pub width: f64,
    /// Where the finished hinge is moved to.
    #[serde(default)]
    pub offset: [f64; 3],
    #[serde(flatten)]
    pub kind: HingeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HingeConfig {
    #[serde(default, rename = "hinge")]
    pub hinges: Vec<HingeEntry>,
}

/// One hinge built from a config entry.
#[derive(Debug, Clone)]
pub struct BuiltHinge {
    pub name: String,
    pub shape: SolidHandle,
    pub hinge_width: f64,
}

impl HingeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, HingeError> {
        let config: HingeConfig = toml::from_str(source).map_err(|e| HingeError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), HingeError> {
        if self.hinges.is_empty() {
            return Err(HingeError::Config {
                reason: "no [[hinge]] entries".to_string(),
            });
        }
        let mut names = HashSet::new();
        for entry in &self.hinges {
            if !names.insert(entry.name.as_str()) {
                return Err(HingeError::Config {
                    reason: format!("duplicate hinge name '{}'", entry.name),
                });
            }
        }
        Ok(())
    }

    /// Build every entry in order. Stops at the first failure.
    #[instrument(skip_all, fields(hinges = self.hinges.len()))]
    pub fn build(&self, kb: &mut dyn KernelBundle) -> Result<Vec<BuiltHinge>, HingeError> {
        let mut built = Vec::with_capacity(self.hinges.len());
        for entry in &self.hinges {
            let result = match &entry.kind {
                HingeKind::Side { options } => {
                    make_side_hinge(kb, entry.height, entry.width, options)?
                }
                HingeKind::Flat {
                    base_height,
                    options,
                } => make_flat_hinge(kb, entry.height, entry.width, *base_height, options)?,
            };
            let shape = if entry.offset == [0.0; 3] {
                result.hinge
            } else {
                kb.translate(&result.hinge, entry.offset)?
            };
            info!(name = %entry.name, "hinge built");
            built.push(BuiltHinge {
                name: entry.name.clone(),
                shape,
                hinge_width: result.hinge_width,
            });
        }
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hinge_kernel::{KernelIntrospect, MockKernel};

    const TWO_HINGES: &str = r#"
[[hinge]]
name = "lid"
kind = "side"
height = 60.0
width = 20.0
offset = [15.0, 0.0, 0.0]
[hinge.options]
hinge_radius = 6.0

[[hinge]]
name = "tray"
kind = "flat"
height = 12
width = 20
base_height = 2.0
[hinge.options]
n_couples = 3
edge_chamfer = 0.0
"#;

    #[test]
    fn test_parses_both_kinds() {
        let config = HingeConfig::from_toml_str(TWO_HINGES).unwrap();
        assert_eq!(config.hinges.len(), 2);
        assert_eq!(
            config.hinges[0].kind,
            HingeKind::Side {
                options: SideHingeOptions {
                    hinge_radius: Some(6.0),
                    ..Default::default()
                }
            }
        );
        match &config.hinges[1].kind {
            HingeKind::Flat {
                base_height,
                options,
            } => {
                assert_eq!(*base_height, 2.0);
                assert_eq!(options.n_couples, 3);
                assert_eq!(options.tolerance, 0.4);
            }
            other => panic!("expected a flat hinge, got {other:?}"),
        }
        assert_eq!(config.hinges[1].offset, [0.0; 3]);
    }

    #[test]
    fn test_builds_in_order_with_offsets() {
        let config = HingeConfig::from_toml_str(TWO_HINGES).unwrap();
        let mut kernel = MockKernel::new();
        let built = config.build(&mut kernel).unwrap();
        assert_eq!(built[0].name, "lid");
        assert_eq!(built[1].name, "tray");
        assert!((built[0].hinge_width - 6.4).abs() < 1e-12);

        let lid = kernel.bounding_box(&built[0].shape).unwrap();
        assert!((lid.min[0] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_unknown_kind_and_options() {
        let unknown_kind = "[[hinge]]\nname = \"a\"\nkind = \"piano\"\nheight = 1.0\nwidth = 1.0\n";
        assert!(matches!(
            HingeConfig::from_toml_str(unknown_kind),
            Err(HingeError::Config { .. })
        ));

        let typo = "[[hinge]]\nname = \"a\"\nkind = \"side\"\nheight = 10.0\nwidth = 10.0\n[hinge.options]\nradius = 2.0\n";
        assert!(matches!(
            HingeConfig::from_toml_str(typo),
            Err(HingeError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_names() {
        assert!(matches!(
            HingeConfig::from_toml_str(""),
            Err(HingeError::Config { .. })
        ));

        let dup = "[[hinge]]\nname = \"a\"\nkind = \"side\"\nheight = 10.0\nwidth = 10.0\n\n[[hinge]]\nname = \"a\"\nkind = \"side\"\nheight = 10.0\nwidth = 10.0\n";
        assert!(matches!(
            HingeConfig::from_toml_str(dup),
            Err(HingeError::Config { .. })
        ));
    }

    #[test]
    fn test_build_stops_at_first_invalid_entry() {
        let config = HingeConfig::from_toml_str(
            "[[hinge]]\nname = \"bad\"\nkind = \"flat\"\nheight = 12.0\nwidth = 1.0\nbase_height = 2.0\n",
        )
        .unwrap();
        let mut kernel = MockKernel::new();
        let err = config.build(&mut kernel).unwrap_err();
        assert!(matches!(err, HingeError::InvalidParameter { .. }));
    }
}
