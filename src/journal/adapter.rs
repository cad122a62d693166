use crate::errors::{JournalError, JournalResult};
use crate::journal::trade::{Classification, Direction, Strategy, Trade};

/// Trade as it arrives from a fixture file or a dashboard payload.
///
/// Both the snake_case fixture shape (nested `strategy`/`account`) and the
/// camelCase UI shape (flat `strategyName`, `accountId`, `outOfRisk`) land
/// here; `into_trade` is the only path into the canonical [`Trade`].
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "trade_date", alias = "tradeDate", alias = "dateTime")]
    pub date: String,
    #[serde(alias = "pnl")]
    pub result: f64,
    #[serde(default, alias = "resultType", alias = "result_type")]
    pub classification: Option<String>,
    #[serde(alias = "side", alias = "type")]
    pub direction: String,
    #[serde(default)]
    pub strategy: Option<StrategyRecord>,
    #[serde(default, alias = "strategyId")]
    pub strategy_id: Option<String>,
    #[serde(default, alias = "strategyName")]
    pub strategy_name: Option<String>,
    #[serde(default, alias = "outOfStrategy")]
    pub out_of_strategy: Option<bool>,
    #[serde(alias = "symbol")]
    pub asset: AssetRecord,
    #[serde(default)]
    pub account: Option<AccountRecord>,
    #[serde(default, alias = "accountId")]
    pub account_id: Option<String>,
    #[serde(default, alias = "outOfRisk")]
    pub out_of_risk: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct StrategyRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "outOfStrategy")]
    pub out_of_strategy: Option<bool>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum AssetRecord {
    Symbol(String),
    Nested { symbol: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AccountRecord {
    pub id: String,
}

impl TradeRecord {
    pub fn into_trade(self) -> JournalResult<Trade> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let classification = match self.classification.as_deref() {
            Some(raw) => raw.parse::<Classification>()?,
            None => Classification::from_result(self.result),
        };
        let direction = self.direction.parse::<Direction>()?;

        let nested = self.strategy.unwrap_or(StrategyRecord {
            id: None,
            name: None,
            out_of_strategy: None,
        });
        let strategy_name = nested.name.or(self.strategy_name);
        let strategy_id = nested
            .id
            .or(self.strategy_id)
            .or_else(|| strategy_name.as_deref().map(slugify));
        let (strategy_id, strategy_name) = match (strategy_id, strategy_name) {
            (Some(id), Some(name)) => (id, name),
            (Some(id), None) => (id.clone(), id),
            _ => {
                return Err(JournalError::InvalidRecord(format!(
                    "trade {id} has no strategy"
                )))
            }
        };

        let account_id = self
            .account
            .map(|a| a.id)
            .or(self.account_id)
            .ok_or_else(|| JournalError::InvalidRecord(format!("trade {id} has no account")))?;

        let asset = match self.asset {
            AssetRecord::Symbol(symbol) | AssetRecord::Nested { symbol } => symbol,
        };

        Ok(Trade {
            id,
            date: self.date,
            result: self.result,
            classification,
            direction,
            strategy: Strategy {
                id: strategy_id,
                name: strategy_name,
                out_of_strategy: nested
                    .out_of_strategy
                    .or(self.out_of_strategy)
                    .unwrap_or(false),
            },
            asset,
            account_id,
            out_of_risk: self.out_of_risk,
        })
    }
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
