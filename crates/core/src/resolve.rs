//! Mapping resolver: variant → (base key, multiplier).

use crate::config::ResolutionConfig;
use crate::variant::{BaseKey, VariantRef};

/// Outcome of classifying one variant reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub base_key: BaseKey,
    pub multiplier: i64,
}

/// Resolve a variant to its base key and unit multiplier.
///
/// Resolution order:
/// 1. explicit mapping by variant id (declared base + multiplier);
/// 2. pattern rule on the SKU, when the fallback is enabled: a suffix match
///    yields the parsed multiplier, keyed by the variant's own id when the
///    multiplier is 1 (the line already is the base) or by the derived base
///    SKU `<prefix>-1X` otherwise;
/// 3. the line's own variant id (or bare SKU) with multiplier 1 — an
///    unrecognized line is its own untracked base unit: it never inflates
///    another family's demand and is never blocked for lack of data.
///
/// Returns `None` only when the reference carries neither id nor SKU.
pub fn resolve(variant: &VariantRef, config: &ResolutionConfig) -> Option<Resolution> {
    if let Some(id) = &variant.id {
        if let Some(mapping) = config.mappings.get(id) {
            return Some(Resolution {
                base_key: BaseKey::Variant(mapping.base.clone()),
                multiplier: mapping.multiplier.max(1),
            });
        }
    }

    if config.enable_sku_fallback {
        if let Some(sku) = &variant.sku {
            if let Some(caps) = config.sku_pattern().captures(sku) {
                let multiplier = caps
                    .get(2)
                    .and_then(|m| m.as_str().parse::<i64>().ok())
                    .filter(|n| *n > 0);
                if let (Some(prefix), Some(multiplier)) = (caps.get(1), multiplier) {
                    let base_key = match (&variant.id, multiplier) {
                        // A single with a known id keys by that id directly.
                        (Some(id), 1) => BaseKey::Variant(id.clone()),
                        _ => BaseKey::DerivedSku(format!("{}-1X", prefix.as_str())),
                    };
                    return Some(Resolution {
                        base_key,
                        multiplier,
                    });
                }
            }
        }
    }

    match (&variant.id, &variant.sku) {
        (Some(id), _) => Some(Resolution {
            base_key: BaseKey::Variant(id.clone()),
            multiplier: 1,
        }),
        (None, Some(sku)) => Some(Resolution {
            base_key: BaseKey::DerivedSku(sku.clone()),
            multiplier: 1,
        }),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::{ExplicitMapping, ResolutionConfig, SettingsDoc};
    use crate::variant::VariantId;

    fn config_with_mapping(case_id: &str, base_id: &str, multiplier: i64) -> ResolutionConfig {
        let mut config = ResolutionConfig::default();
        config.mappings = HashMap::from([(
            VariantId::from(case_id),
            ExplicitMapping {
                base: VariantId::from(base_id),
                multiplier,
            },
        )]);
        config
    }

    fn sku_ref(sku: &str) -> VariantRef {
        VariantRef {
            id: None,
            sku: Some(sku.to_string()),
        }
    }

    #[test]
    fn explicit_mapping_wins_over_pattern() {
        let config = config_with_mapping("gid://v/12", "gid://v/1", 12);
        let variant = VariantRef {
            id: Some(VariantId::from("gid://v/12")),
            // Pattern would say 6; the merchant's mapping says 12.
            sku: Some("WIDGET-6X".to_string()),
        };
        let r = resolve(&variant, &config).unwrap();
        assert_eq!(r.base_key, BaseKey::Variant(VariantId::from("gid://v/1")));
        assert_eq!(r.multiplier, 12);
    }

    #[test]
    fn case_sku_derives_base_sku_and_multiplier() {
        let r = resolve(&sku_ref("WIDGET-12X"), &ResolutionConfig::default()).unwrap();
        assert_eq!(r.base_key, BaseKey::DerivedSku("WIDGET-1X".to_string()));
        assert_eq!(r.multiplier, 12);
    }

    #[test]
    fn single_sku_is_idempotent_under_resolution() {
        // A -1X SKU derives its own key with multiplier 1.
        let r = resolve(&sku_ref("WIDGET-1X"), &ResolutionConfig::default()).unwrap();
        assert_eq!(r.base_key, BaseKey::DerivedSku("WIDGET-1X".to_string()));
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn single_with_id_keys_by_its_own_id() {
        let variant = VariantRef {
            id: Some(VariantId::from("gid://v/1")),
            sku: Some("WIDGET-1X".to_string()),
        };
        let r = resolve(&variant, &ResolutionConfig::default()).unwrap();
        assert_eq!(r.base_key, BaseKey::Variant(VariantId::from("gid://v/1")));
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn zero_multiplier_suffix_falls_back_to_own_key() {
        let variant = VariantRef {
            id: Some(VariantId::from("gid://v/7")),
            sku: Some("WIDGET-000X".to_string()),
        };
        let r = resolve(&variant, &ResolutionConfig::default()).unwrap();
        assert_eq!(r.base_key, BaseKey::Variant(VariantId::from("gid://v/7")));
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn fallback_disabled_ignores_pattern() {
        let config = ResolutionConfig::from_settings(SettingsDoc {
            enable_sku_fallback: Some(false),
            ..Default::default()
        })
        .unwrap();
        let variant = VariantRef {
            id: Some(VariantId::from("gid://v/7")),
            sku: Some("WIDGET-12X".to_string()),
        };
        let r = resolve(&variant, &config).unwrap();
        assert_eq!(r.base_key, BaseKey::Variant(VariantId::from("gid://v/7")));
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn unmatched_sku_without_id_keys_by_sku() {
        let r = resolve(&sku_ref("PLAIN"), &ResolutionConfig::default()).unwrap();
        assert_eq!(r.base_key, BaseKey::DerivedSku("PLAIN".to_string()));
        assert_eq!(r.multiplier, 1);
    }

    #[test]
    fn empty_reference_is_unclassifiable() {
        assert!(resolve(&VariantRef::default(), &ResolutionConfig::default()).is_none());
    }
}
