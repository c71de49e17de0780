use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingItem {
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Pre-formatted heat, e.g. "12.3w". A raw number is formatted on read.
    #[serde(default, alias = "heat", deserialize_with = "heat_text")]
    pub heat_display: String,
    /// Day-over-day heat change in percent, one decimal place
    #[serde(default, alias = "trend")]
    pub trend_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TrendingItem {
    /// Signed percentage, e.g. "+12%" or "-3.5%".
    pub fn trend_display(&self) -> String {
        let trend = (self.trend_percent * 10.0).round() / 10.0;
        if !trend.is_finite() || trend == 0.0 {
            "0%".to_string()
        } else if trend > 0.0 {
            format!("+{}%", trend)
        } else {
            format!("{}%", trend)
        }
    }

    pub fn source_display(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHeat {
    Text(String),
    Number(f64),
}

fn heat_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawHeat::deserialize(deserializer)? {
        RawHeat::Text(text) => text,
        RawHeat::Number(heat) => format_heat(heat),
    })
}

/// Format a raw heat value for display.
/// 10,000 and up render in units of "w" (10k), 1,000 and up in "k".
pub fn format_heat(heat: f64) -> String {
    if !heat.is_finite() || heat < 0.0 {
        return "0".to_string();
    }
    if heat >= 10_000.0 {
        format!("{:.1}w", heat / 10_000.0)
    } else if heat >= 1_000.0 {
        format!("{:.1}k", heat / 1_000.0)
    } else {
        format!("{}", heat as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pipeline_spelling() {
        let json = r#"{"name":"WE晋级","desc":"比赛梗","heat":"12.3w","trend":35,"source":"bilibili"}"#;
        let item: TrendingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.description, "比赛梗");
        assert_eq!(item.heat_display, "12.3w");
        assert_eq!(item.trend_percent, 35.0);
        assert_eq!(item.source_display(), "bilibili");
    }

    #[test]
    fn test_deserialize_fractional_trend_and_numeric_heat() {
        let json = r#"{"name":"a","heat":123456,"trend":12.5}"#;
        let item: TrendingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.heat_display, "12.3w");
        assert_eq!(item.trend_percent, 12.5);
        assert_eq!(item.trend_display(), "+12.5%");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let item = TrendingItem {
            name: "meme".into(),
            description: "desc".into(),
            heat_display: "1.2k".into(),
            trend_percent: -4.0,
            source: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["heatDisplay"], "1.2k");
        assert_eq!(value["trendPercent"], -4.0);
        assert!(value.get("source").is_none());
    }

    #[test]
    fn test_trend_display() {
        let mut item: TrendingItem = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(item.trend_display(), "0%");
        item.trend_percent = 12.0;
        assert_eq!(item.trend_display(), "+12%");
        item.trend_percent = -3.0;
        assert_eq!(item.trend_display(), "-3%");
        item.trend_percent = -0.04;
        assert_eq!(item.trend_display(), "0%");
        item.trend_percent = 7.25;
        assert_eq!(item.trend_display(), "+7.3%");
    }

    #[test]
    fn test_format_heat() {
        assert_eq!(format_heat(123_456.0), "12.3w");
        assert_eq!(format_heat(10_000.0), "1.0w");
        assert_eq!(format_heat(2_500.0), "2.5k");
        assert_eq!(format_heat(999.9), "999");
        assert_eq!(format_heat(-1.0), "0");
        assert_eq!(format_heat(f64::NAN), "0");
    }
}
