use mars_core::MarsRecord;
use mars_scrapers::escape_html;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Mission to Mars</title>
  <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css">
</head>
<body>
<div class="container">
  <div class="jumbotron text-center">
    <h1>Mission to Mars</h1>
    <p><a class="btn btn-primary btn-lg" href="/scrape" role="button">Scrape New Data</a></p>
  </div>
"#;

const FOOT: &str = "</div>\n</body>\n</html>\n";

fn text_or(value: Option<&str>, fallback: &str) -> String {
    escape_html(value.unwrap_or(fallback))
}

/// The home page for the stored record, or a prompt to scrape when there is none.
pub fn render_page(record: Option<&MarsRecord>) -> String {
    let mut html = String::from(HEAD);

    let Some(record) = record else {
        html.push_str("  <p class=\"lead\">No data yet. Use the button above to run the first scrape.</p>\n");
        html.push_str(FOOT);
        return html;
    };

    html.push_str("  <div class=\"row\" id=\"mars-news\">\n");
    html.push_str("    <h2>Latest Mars News</h2>\n");
    html.push_str(&format!(
        "    <h3>{}</h3>\n",
        text_or(record.news_title.as_deref(), "No headline available")
    ));
    html.push_str(&format!("    <p>{}</p>\n", text_or(record.news_paragraph.as_deref(), "")));
    html.push_str("  </div>\n");

    html.push_str("  <div class=\"row\">\n");
    html.push_str("    <div class=\"col-md-8\">\n      <h2>Featured Mars Image</h2>\n");
    match &record.featured_image {
        Some(url) => html.push_str(&format!(
            "      <img src=\"{}\" class=\"img-responsive\" alt=\"Featured Mars image\">\n",
            escape_html(url)
        )),
        None => html.push_str("      <p>No featured image available</p>\n"),
    }
    html.push_str("    </div>\n");
    html.push_str("    <div class=\"col-md-4\">\n      <h2>Mars Facts</h2>\n");
    // already rendered markup
    html.push_str(record.facts.as_deref().unwrap_or("<p>No facts available</p>"));
    html.push_str("\n    </div>\n  </div>\n");

    if let Some(weather) = &record.weather {
        html.push_str("  <div class=\"row\">\n    <h2>Mars Weather</h2>\n");
        html.push_str(weather);
        html.push_str("\n  </div>\n");
    }

    html.push_str("  <div class=\"row\" id=\"mars-hemispheres\">\n    <h2>Mars Hemispheres</h2>\n");
    for hemisphere in &record.hemispheres {
        html.push_str(&format!(
            "    <div class=\"col-md-3\">\n      <img src=\"{}\" class=\"img-thumbnail\" alt=\"{title}\">\n      <h4>{title}</h4>\n    </div>\n",
            escape_html(&hemisphere.image_url),
            title = escape_html(&hemisphere.title),
        ));
    }
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <p class=\"text-muted\">Last updated {}</p>\n",
        record.last_modified.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(FOOT);
    html
}
