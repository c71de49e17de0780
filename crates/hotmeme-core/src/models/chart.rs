use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heat over time for the top memes, one label per point in `dates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub series: Vec<NamedSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    #[serde(default)]
    pub data: Vec<f64>,
    /// Rendering hints (line type, symbol, labels) carried through untouched
    #[serde(flatten)]
    pub style: Map<String, Value>,
}

impl NamedSeries {
    pub fn latest(&self) -> Option<f64> {
        self.data.last().copied()
    }

    /// Change between the last two points, if there are two.
    pub fn latest_change(&self) -> Option<f64> {
        match self.data.as_slice() {
            [.., prev, last] => Some(last - prev),
            _ => None,
        }
    }
}

impl ChartDocument {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn latest_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    /// Series ordered by their most recent value, highest first.
    pub fn ranked(&self) -> Vec<&NamedSeries> {
        let mut ranked: Vec<&NamedSeries> = self.series.iter().collect();
        ranked.sort_by(|a, b| {
            let a = a.latest().unwrap_or(f64::MIN);
            let b = b.latest().unwrap_or(f64::MIN);
            b.total_cmp(&a)
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_JSON: &str = r##"{
        "dates": ["05月24日", "05月25日", "05月26日"],
        "series": [
            {"name": "A", "type": "line", "smooth": true, "data": [0, 10, 40]},
            {"name": "B", "type": "line", "data": [5, 80, 60], "endLabel": {"show": true, "color": "#ff4d4f"}},
            {"name": "C", "data": []}
        ]
    }"##;

    #[test]
    fn test_parse_keeps_style() {
        let chart: ChartDocument = serde_json::from_str(CHART_JSON).unwrap();
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].style.get("type"), Some(&Value::from("line")));

        let round = serde_json::to_value(&chart).unwrap();
        assert_eq!(round["series"][1]["endLabel"]["color"], "#ff4d4f");
    }

    #[test]
    fn test_latest_values() {
        let chart: ChartDocument = serde_json::from_str(CHART_JSON).unwrap();
        assert_eq!(chart.latest_date(), Some("05月26日"));
        assert_eq!(chart.series[0].latest(), Some(40.0));
        assert_eq!(chart.series[1].latest_change(), Some(-20.0));
        assert_eq!(chart.series[2].latest(), None);
        assert_eq!(chart.series[2].latest_change(), None);
    }

    #[test]
    fn test_ranked() {
        let chart: ChartDocument = serde_json::from_str(CHART_JSON).unwrap();
        let names: Vec<&str> = chart.ranked().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty_default() {
        let chart: ChartDocument = serde_json::from_str("{}").unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart, ChartDocument::default());
    }
}
