use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace (deployment edition) a pack can be delivered to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Marketplace {
    #[default]
    #[serde(rename = "xsoar")]
    Xsoar,
    #[serde(rename = "marketplacev2")]
    MarketplaceV2,
    #[serde(rename = "xpanse")]
    Xpanse,
    #[serde(rename = "xsoar_saas")]
    XsoarSaas,
    #[serde(rename = "xsoar_on_prem")]
    XsoarOnPrem,
    #[serde(rename = "platform")]
    Platform,
}

impl Marketplace {
    pub const ALL: [Marketplace; 6] = [
        Marketplace::Xsoar,
        Marketplace::MarketplaceV2,
        Marketplace::Xpanse,
        Marketplace::XsoarSaas,
        Marketplace::XsoarOnPrem,
        Marketplace::Platform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::Xsoar => "xsoar",
            Marketplace::MarketplaceV2 => "marketplacev2",
            Marketplace::Xpanse => "xpanse",
            Marketplace::XsoarSaas => "xsoar_saas",
            Marketplace::XsoarOnPrem => "xsoar_on_prem",
            Marketplace::Platform => "platform",
        }
    }

    /// Name used inside `<~TAG>` blocks of readme and description text
    pub fn tag(&self) -> &'static str {
        match self {
            Marketplace::Xsoar => "XSOAR",
            Marketplace::MarketplaceV2 => "XSIAM",
            Marketplace::Xpanse => "XPANSE",
            Marketplace::XsoarSaas => "XSOAR_SAAS",
            Marketplace::XsoarOnPrem => "XSOAR_ON_PREM",
            Marketplace::Platform => "PLATFORM",
        }
    }

    /// Marketplaces whose tagged blocks are kept when rendering for `self`
    pub fn kept_tags(&self) -> &'static [Marketplace] {
        match self {
            Marketplace::Xsoar => &[Marketplace::Xsoar],
            Marketplace::XsoarOnPrem => &[Marketplace::Xsoar, Marketplace::XsoarOnPrem],
            Marketplace::XsoarSaas => &[Marketplace::Xsoar, Marketplace::XsoarSaas],
            Marketplace::MarketplaceV2 => &[Marketplace::MarketplaceV2],
            Marketplace::Xpanse => &[Marketplace::Xpanse],
            Marketplace::Platform => &[Marketplace::Platform],
        }
    }

    /// Whether "Cortex XSOAR" branding is rewritten for this marketplace
    pub fn rewrites_xsoar_references(&self) -> bool {
        matches!(
            self,
            Marketplace::MarketplaceV2 | Marketplace::Xpanse | Marketplace::Platform
        )
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Marketplace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marketplace::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Invalid marketplace: {}. Expected one of: {}",
                    s,
                    Marketplace::ALL
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}
