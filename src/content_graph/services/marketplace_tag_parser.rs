use crate::content_graph::domain::Marketplace;
use regex::Regex;

/// MarketplaceTagParser renders `<~TAG>...</~TAG>` blocks for one marketplace
///
/// Blocks tagged for a kept marketplace lose their markers and keep their
/// content. Blocks tagged for any other marketplace are removed entirely.
///
/// # Example
/// ```
/// use packwright::content_graph::domain::Marketplace;
/// use packwright::content_graph::services::MarketplaceTagParser;
///
/// let parser = MarketplaceTagParser::new(Marketplace::MarketplaceV2);
/// let text = "Use <~XSIAM>the datasets</~XSIAM><~XSOAR>the incidents</~XSOAR>.";
/// assert_eq!(parser.parse_text(text), "Use the datasets.");
/// ```
#[derive(Debug, Clone)]
pub struct MarketplaceTagParser {
    marketplace: Marketplace,
    kept: Vec<Regex>,
    removed: Vec<Regex>,
}

impl MarketplaceTagParser {
    pub fn new(marketplace: Marketplace) -> Self {
        let kept_tags = marketplace.kept_tags();
        let (kept, removed): (Vec<Marketplace>, Vec<Marketplace>) = Marketplace::ALL
            .into_iter()
            .partition(|m| kept_tags.contains(m));

        Self {
            marketplace,
            kept: kept.iter().map(Self::block_pattern).collect(),
            removed: removed.iter().map(Self::block_pattern).collect(),
        }
    }

    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    /// Rewrites every tagged block until the text stops changing
    pub fn parse_text(&self, text: &str) -> String {
        // Each pass that changes the text shortens it, so this terminates
        let mut current = text.to_string();
        loop {
            let next = self.single_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn single_pass(&self, text: &str) -> String {
        let mut output = text.to_string();
        for pattern in &self.kept {
            output = pattern.replace_all(&output, "$content").into_owned();
        }
        for pattern in &self.removed {
            output = pattern.replace_all(&output, "").into_owned();
        }
        output
    }

    fn block_pattern(marketplace: &Marketplace) -> Regex {
        let tag = regex::escape(marketplace.tag());
        Regex::new(&format!(r"(?s)<~{tag}>(?P<content>.*?)</~{tag}>"))
            .expect("Failed to build marketplace tag pattern")
    }
}
