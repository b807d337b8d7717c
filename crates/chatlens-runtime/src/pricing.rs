use chatlens_types::{BoxError, PricingLookup};
use std::collections::HashMap;

use crate::config::{ModelPrice, PricingConfig};

// USD per million tokens (input, output)
fn builtin_prices() -> HashMap<&'static str, (f64, f64)> {
    HashMap::from([
        // OpenAI
        ("gpt-3.5-turbo", (0.5, 1.5)),
        ("gpt-4", (30.0, 60.0)),
        ("gpt-4-32k", (60.0, 120.0)),
        ("gpt-4-turbo", (10.0, 30.0)),
        ("gpt-4o", (2.5, 10.0)),
        ("gpt-4o-mini", (0.15, 0.6)),
        ("gpt-4.1", (2.0, 8.0)),
        ("gpt-4.1-mini", (0.4, 1.6)),
        ("gpt-4.1-nano", (0.1, 0.4)),
        ("gpt-5", (1.25, 10.0)),
        ("gpt-5-mini", (0.25, 2.0)),
        ("gpt-5-nano", (0.05, 0.4)),
        ("o1", (15.0, 60.0)),
        ("o1-mini", (1.1, 4.4)),
        ("o3", (2.0, 8.0)),
        ("o3-mini", (1.1, 4.4)),
        ("o4-mini", (1.1, 4.4)),
        // Anthropic
        ("claude-3-haiku", (0.25, 1.25)),
        ("claude-3-5-haiku", (0.8, 4.0)),
        ("claude-3-5-sonnet", (3.0, 15.0)),
        ("claude-3-7-sonnet", (3.0, 15.0)),
        ("claude-3-opus", (15.0, 75.0)),
        ("claude-sonnet-4", (3.0, 15.0)),
        ("claude-opus-4", (15.0, 75.0)),
        ("claude-haiku-4-5", (1.0, 5.0)),
        // Google
        ("gemini-1.5-flash", (0.075, 0.3)),
        ("gemini-1.5-pro", (1.25, 5.0)),
        ("gemini-2.0-flash", (0.1, 0.4)),
        ("gemini-2.5-flash", (0.3, 2.5)),
        ("gemini-2.5-pro", (1.25, 10.0)),
    ])
}

/// Model prices resolved by longest prefix on the lower-cased model name.
///
/// "gpt-4o-mini-2024-07-18" matches "gpt-4o-mini", not "gpt-4o" or "gpt-4".
#[derive(Debug, Clone)]
pub struct PriceTable {
    prices: HashMap<String, ModelPrice>,
}

impl PriceTable {
    pub fn builtin() -> Self {
        let prices = builtin_prices()
            .into_iter()
            .map(|(prefix, (input, output))| {
                (
                    prefix.to_string(),
                    ModelPrice {
                        input_per_million: input,
                        output_per_million: output,
                    },
                )
            })
            .collect();
        Self { prices }
    }

    /// Built-in prices with the configured entries layered on top.
    pub fn from_config(config: &PricingConfig) -> Self {
        let mut table = Self::builtin();
        for (prefix, price) in &config.models {
            table.set(prefix, *price);
        }
        table
    }

    pub fn set(&mut self, prefix: &str, price: ModelPrice) {
        self.prices.insert(prefix.to_lowercase(), price);
    }

    pub fn resolve(&self, model: &str) -> Option<ModelPrice> {
        let model = model.to_lowercase();
        let mut best_match: Option<ModelPrice> = None;
        let mut best_len = 0;

        for (prefix, price) in &self.prices {
            if model.starts_with(prefix.as_str()) && prefix.len() > best_len {
                best_match = Some(*price);
                best_len = prefix.len();
            }
        }

        best_match
    }

    /// Cost in USD, rounded to 6 decimal places.
    pub fn cost_of(&self, model: &str, prompt_tokens: u64, completion_tokens: u64) -> Option<f64> {
        let price = self.resolve(model)?;
        let cost = prompt_tokens as f64 * price.input_per_million / 1_000_000.0
            + completion_tokens as f64 * price.output_per_million / 1_000_000.0;
        Some((cost * 1_000_000.0).round() / 1_000_000.0)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PricingLookup for PriceTable {
    fn cost(
        &self,
        model: &str,
        prompt_tokens: u64,
        completion_tokens: u64,
    ) -> Result<Option<f64>, BoxError> {
        Ok(self.cost_of(model, prompt_tokens, completion_tokens))
    }
}
