//! Policy configuration management.
//!
//! Thresholds are configuration, not code: every value below can come from a
//! config file or a `TAYSEER`-prefixed environment variable, and every field
//! has a default so an empty environment yields the documented policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tayseer_shared::MinorUnits;

use super::types::FinancingKind;

/// Decision thresholds shared by all products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Largest amount eligible for auto-approval.
    #[serde(default = "default_auto_approve_max")]
    pub auto_approve_max: MinorUnits,
    /// Largest amount a new user (thin history) may request at all.
    #[serde(default = "default_reject_max_for_new_user")]
    pub reject_max_for_new_user: MinorUnits,
    /// Amounts at or above this floor always need at least manual review.
    #[serde(default = "default_review_amount_floor")]
    pub review_amount_floor: MinorUnits,
    /// Minimum number of past transactions for auto-approval.
    #[serde(default = "default_min_history_transactions")]
    pub min_history_transactions: usize,
    /// Required current balance as a fraction of the requested amount.
    #[serde(default = "default_min_current_balance_ratio")]
    pub min_current_balance_ratio: Decimal,
}

fn default_auto_approve_max() -> MinorUnits {
    100_000
}

fn default_reject_max_for_new_user() -> MinorUnits {
    50_000
}

fn default_review_amount_floor() -> MinorUnits {
    500_000
}

fn default_min_history_transactions() -> usize {
    5
}

fn default_min_current_balance_ratio() -> Decimal {
    Decimal::new(25, 2) // 0.25
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            auto_approve_max: default_auto_approve_max(),
            reject_max_for_new_user: default_reject_max_for_new_user(),
            review_amount_floor: default_review_amount_floor(),
            min_history_transactions: default_min_history_transactions(),
            min_current_balance_ratio: default_min_current_balance_ratio(),
        }
    }
}

/// Per-product policy: hard ceiling, pricing and the normal margin band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPolicy {
    /// Hard ceiling; amounts above it are rejected outright.
    pub ceiling: MinorUnits,
    /// Annual rate (BNPL) or default annual margin (Mourabaha), percent.
    pub annual_rate_pct: Decimal,
    /// Lower edge of the normal margin band, percent.
    #[serde(default = "default_margin_min_pct")]
    pub margin_min_pct: Decimal,
    /// Upper edge of the normal margin band, percent.
    #[serde(default = "default_margin_max_pct")]
    pub margin_max_pct: Decimal,
}

fn default_margin_min_pct() -> Decimal {
    Decimal::from(5u32)
}

fn default_margin_max_pct() -> Decimal {
    Decimal::from(40u32)
}

impl ProductPolicy {
    fn default_bnpl() -> Self {
        Self {
            ceiling: 1_000_000,
            annual_rate_pct: Decimal::from(24u32),
            margin_min_pct: default_margin_min_pct(),
            margin_max_pct: default_margin_max_pct(),
        }
    }

    fn default_mourabaha() -> Self {
        Self {
            ceiling: 2_000_000,
            annual_rate_pct: Decimal::new(235, 1), // 23.5
            margin_min_pct: default_margin_min_pct(),
            margin_max_pct: default_margin_max_pct(),
        }
    }
}

/// Treasury settlement buckets used by the lifecycle manager.
///
/// Account names are resolved against the closed treasury account set at
/// manager construction; a typo fails fast with `UNKNOWN_ACCOUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Account credited on disbursement (merchant acquiring side).
    #[serde(default = "default_disbursement_account")]
    pub disbursement_account: String,
    /// Account debited on repayment (applicant wallet float side).
    #[serde(default = "default_repayment_source_account")]
    pub repayment_source_account: String,
}

fn default_disbursement_account() -> String {
    "commercial_banks".to_string()
}

fn default_repayment_source_account() -> String {
    "mobile_money_operators".to_string()
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            disbursement_account: default_disbursement_account(),
            repayment_source_account: default_repayment_source_account(),
        }
    }
}

/// Full decisioning policy: thresholds, per-product policies, settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Shared decision thresholds.
    #[serde(default)]
    pub thresholds: RiskThresholds,
    /// BNPL (installment purchase) policy.
    #[serde(default = "ProductPolicy::default_bnpl")]
    pub bnpl: ProductPolicy,
    /// Mourabaha policy.
    #[serde(default = "ProductPolicy::default_mourabaha")]
    pub mourabaha: ProductPolicy,
    /// Treasury settlement buckets.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            bnpl: ProductPolicy::default_bnpl(),
            mourabaha: ProductPolicy::default_mourabaha(),
            settlement: SettlementConfig::default(),
        }
    }
}

impl PolicyConfig {
    /// Returns the policy for the given product.
    #[must_use]
    pub const fn product(&self, kind: FinancingKind) -> &ProductPolicy {
        match kind {
            FinancingKind::InstallmentPurchase => &self.bnpl,
            FinancingKind::Mourabaha => &self.mourabaha,
        }
    }

    /// Loads configuration from config files and the environment.
    ///
    /// Layering matches the deployment convention: `config/default`, then
    /// `config/{RUN_MODE}`, then `TAYSEER`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TAYSEER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_thresholds() {
        let t = RiskThresholds::default();
        assert_eq!(t.auto_approve_max, 100_000);
        assert_eq!(t.reject_max_for_new_user, 50_000);
        assert_eq!(t.review_amount_floor, 500_000);
        assert_eq!(t.min_history_transactions, 5);
        assert_eq!(t.min_current_balance_ratio, dec!(0.25));
    }

    #[test]
    fn test_default_products() {
        let config = PolicyConfig::default();
        assert_eq!(config.bnpl.ceiling, 1_000_000);
        assert_eq!(config.bnpl.annual_rate_pct, dec!(24));
        assert_eq!(config.mourabaha.ceiling, 2_000_000);
        assert_eq!(config.mourabaha.annual_rate_pct, dec!(23.5));
        assert_eq!(config.mourabaha.margin_min_pct, dec!(5));
        assert_eq!(config.mourabaha.margin_max_pct, dec!(40));
    }

    #[test]
    fn test_product_lookup() {
        let config = PolicyConfig::default();
        assert_eq!(
            config.product(FinancingKind::InstallmentPurchase).ceiling,
            config.bnpl.ceiling
        );
        assert_eq!(
            config.product(FinancingKind::Mourabaha).ceiling,
            config.mourabaha.ceiling
        );
    }

    #[test]
    fn test_empty_sources_deserialize_to_defaults() {
        let config: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PolicyConfig::default());
    }
}
