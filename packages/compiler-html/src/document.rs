use pagecraft_common::escape_html;

/// Assemble the three compiled artifacts into one self-contained
/// document: stylesheet embedded in the head, script at the end of the
/// body.
pub fn compile_standalone(title: &str, markup: &str, stylesheet: &str, script: &str) -> String {
    let mut doc = String::new();

    doc.push_str("<!DOCTYPE html>\n");
    doc.push_str("<html lang=\"en\">\n");
    doc.push_str("<head>\n");
    doc.push_str("  <meta charset=\"UTF-8\">\n");
    doc.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    doc.push_str("  <style>\n");
    doc.push_str(stylesheet);
    doc.push_str("  </style>\n");
    doc.push_str("</head>\n");
    doc.push_str("<body>\n");
    doc.push_str(markup);
    doc.push_str("<script>\n");
    doc.push_str(script);
    doc.push_str("</script>\n");
    doc.push_str("</body>\n");
    doc.push_str("</html>\n");

    doc
}

/// Assemble a document that references the stylesheet and script as
/// separate files, for multi-artifact export.
pub fn compile_linked(
    title: &str,
    markup: &str,
    stylesheet_href: &str,
    script_src: &str,
) -> String {
    let mut doc = String::new();

    doc.push_str("<!DOCTYPE html>\n");
    doc.push_str("<html lang=\"en\">\n");
    doc.push_str("<head>\n");
    doc.push_str("  <meta charset=\"UTF-8\">\n");
    doc.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    doc.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    doc.push_str(&format!(
        "  <link rel=\"stylesheet\" href=\"{}\">\n",
        escape_html(stylesheet_href)
    ));
    doc.push_str("</head>\n");
    doc.push_str("<body>\n");
    doc.push_str(markup);
    doc.push_str(&format!(
        "<script src=\"{}\"></script>\n",
        escape_html(script_src)
    ));
    doc.push_str("</body>\n");
    doc.push_str("</html>\n");

    doc
}
