use crate::markup::Element;

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Stylesheet and runtime the generated page expects alongside it.
const X3DOM_CSS: &str = "./x3dom-v1.0.css";
const X3DOM_JS: &str = "./x3dom-v1.0.js";
/// Page-side script wiring anchor hover behaviour.
const ANCHOR_JS: &str = "./aer-anchors.js";

/// Wrap an X3D scene in a standalone XHTML page.
///
/// The page carries the world's title, an icon link taken from the
/// scene's `altImg`, the x3dom stylesheet/runtime references, and a
/// source link back to the original world when `altSrc` is known:
///
/// ```text
/// <html xmlns=...>
///   <head> title · generator meta · icon · css · anchor script </head>
///   <body> h1 · <x3d width=600px height=400px> · source link · x3dom </body>
/// </html>
/// ```
#[must_use]
pub fn build_page(scene: &Element) -> Element {
    let title = scene.get_attr("title").unwrap_or_default().to_string();
    let alt_src = scene.get_attr("altSrc").map(str::to_string);

    let mut head = Element::new("head").child(Element::new("title").text(title.clone())).child(
        Element::new("meta")
            .attr("name", "generator")
            .attr("content", "aer"),
    );
    if let Some(icon) = scene.get_attr("altImg") {
        head.push(
            Element::new("link")
                .attr("rel", "icon")
                .attr("href", icon)
                .attr("type", "image/png"),
        );
    }
    head.push(
        Element::new("link")
            .attr("rel", "stylesheet")
            .attr("type", "text/css")
            .attr("media", "screen")
            .attr("href", X3DOM_CSS),
    );
    head.push(
        Element::new("script")
            .attr("type", "text/javascript")
            .attr("src", ANCHOR_JS)
            .text(""),
    );

    let mut sized_scene = scene.clone();
    sized_scene.set_attr("width", "600px");
    sized_scene.set_attr("height", "400px");

    let mut body = Element::new("body")
        .child(Element::new("h1").text(title))
        .child(sized_scene);
    if let Some(src) = &alt_src {
        body.push(
            Element::new("p").text("Source:").child(
                Element::new("a")
                    .attr("href", src.clone())
                    .text("Atmosphere world format"),
            ),
        );
    }
    body.push(
        Element::new("script")
            .attr("type", "text/javascript")
            .attr("src", X3DOM_JS)
            .text(""),
    );

    let mut html = Element::new("html").attr("xmlns", XHTML_NS);
    if let Some(src) = &alt_src {
        if let Some((dir, _)) = src.rsplit_once('/') {
            html.set_attr("xml:base", format!("{dir}/"));
        }
    }
    html.push(head);
    html.push(body);
    html
}
