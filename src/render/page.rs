//! HTML page generation for chart display
//!
//! Wraps Vega-Lite specs in self-contained pages that pull vega-embed from
//! a CDN, so a chart opens in any browser with no local tooling.

use serde_json::Value;

const VEGA_CDN: &str = "https://cdn.jsdelivr.net/npm/vega@5";
const VEGA_LITE_CDN: &str = "https://cdn.jsdelivr.net/npm/vega-lite@5";
const VEGA_EMBED_CDN: &str = "https://cdn.jsdelivr.net/npm/vega-embed@6";

/// A page showing a single chart.
pub fn chart_page(title: &str, spec: &Value) -> String {
    let spec_json = serde_json::to_string(spec).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{vega}"></script>
  <script src="{vega_lite}"></script>
  <script src="{vega_embed}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 2em; }}
  </style>
</head>
<body>
  <div id="vis"></div>
  <script type="text/javascript">
    vegaEmbed('#vis', {spec_json}, {{"actions": true}}).catch(console.error);
  </script>
</body>
</html>
"#,
        title = title,
        vega = VEGA_CDN,
        vega_lite = VEGA_LITE_CDN,
        vega_embed = VEGA_EMBED_CDN,
        spec_json = spec_json,
    )
}

/// A page showing every chart of an analysis, in pipeline order.
pub fn index_page(title: &str, charts: &[(String, Value)]) -> String {
    let mut divs = String::new();
    let mut embeds = String::new();
    for (idx, (chart_title, spec)) in charts.iter().enumerate() {
        let spec_json = serde_json::to_string(spec).unwrap_or_else(|_| "{}".to_string());
        divs.push_str(&format!(
            "  <h2>{}</h2>\n  <div id=\"vis-{}\"></div>\n",
            chart_title, idx
        ));
        embeds.push_str(&format!(
            "    vegaEmbed('#vis-{}', {}, {{\"actions\": true}}).catch(console.error);\n",
            idx, spec_json
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{vega}"></script>
  <script src="{vega_lite}"></script>
  <script src="{vega_embed}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 2em; }}
    h2 {{ margin-top: 2em; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
{divs}  <script type="text/javascript">
{embeds}  </script>
</body>
</html>
"#,
        title = title,
        vega = VEGA_CDN,
        vega_lite = VEGA_LITE_CDN,
        vega_embed = VEGA_EMBED_CDN,
        divs = divs,
        embeds = embeds,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_page_embeds_spec() {
        let spec = json!({"mark": "bar"});
        let page = chart_page("Top 5 Scorers", &spec);

        assert!(page.contains("<title>Top 5 Scorers</title>"));
        assert!(page.contains(VEGA_EMBED_CDN));
        assert!(page.contains(r#"{"mark":"bar"}"#));
    }

    #[test]
    fn test_index_page_embeds_all_charts() {
        let charts = vec![
            ("First".to_string(), json!({"mark": "bar"})),
            ("Second".to_string(), json!({"mark": "text"})),
        ];
        let page = index_page("Season Analysis", &charts);

        assert!(page.contains("vis-0"));
        assert!(page.contains("vis-1"));
        assert!(page.contains("<h2>First</h2>"));
        assert!(page.contains(r#"{"mark":"text"}"#));
    }
}
