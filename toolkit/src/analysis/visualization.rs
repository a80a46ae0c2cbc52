use super::DATE;
use crate::{
    error::Result,
    models::{Chart, Dataset, DatasetExt, LineTrace, Value},
};

pub const CHART_TITLE: &str = "Stocks over time span";

/// Empty line chart with Date on x and Close on y
pub fn plot_stock() -> Chart {
    let mut chart = Chart::new();
    chart.update_layout(CHART_TITLE, "Date", "Close");
    chart
}

/// Appends `column` against Date as a line series named `name`
pub fn add_trace_plot<'a>(
    dataset: &Dataset,
    column: &str,
    fig: &'a mut Chart,
    name: &str,
) -> Result<&'a mut Chart> {
    let dates = dataset.column(&dataset.resolve(DATE)?)?;
    let x = (0..dates.len())
        .map(|i| Ok(Value::from(dates.get(i)?)))
        .collect::<Result<Vec<_>>>()?;
    let y = dataset.f64_values(column)?;
    Ok(fig.add_trace(LineTrace::new(name, x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::closes;
    use crate::error::ToolkitError;

    #[test]
    fn test_empty_chart_layout() {
        let chart = plot_stock();
        assert!(chart.traces().is_empty());
        assert_eq!(chart.layout().title.text, CHART_TITLE);
        assert_eq!(chart.layout().xaxis.title.text, "Date");
        assert_eq!(chart.layout().yaxis.title.text, "Close");
    }

    #[test]
    fn test_traces_accumulate() {
        let mut chart = plot_stock();
        add_trace_plot(&closes(&[1.0, 2.0, 3.0]), "Close", &mut chart, "AAPL").unwrap();
        add_trace_plot(&closes(&[4.0, 5.0]), "Close", &mut chart, "MSFT").unwrap();

        let traces = chart.traces();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].name, "AAPL");
        assert_eq!(traces[0].len(), 3);
        assert_eq!(traces[1].name, "MSFT");
        assert_eq!(traces[1].len(), 2);

        let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["x"][0], "2024-01-01");
        assert_eq!(json["data"][1]["y"][1], 5.0);
    }

    #[test]
    fn test_trace_needs_existing_column() {
        let mut chart = plot_stock();
        let err = add_trace_plot(&closes(&[1.0]), "Adj Close", &mut chart, "X").unwrap_err();
        assert!(matches!(err, ToolkitError::ColumnNotFound(_)));
        assert!(chart.traces().is_empty());
    }
}
