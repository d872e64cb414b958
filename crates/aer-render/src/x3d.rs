use std::collections::BTreeMap;

use aer_decoder::WorldModel;
use aer_types::DecodedRecord;

use crate::markup::Element;

const X3D_NS: &str = "http://www.web3d.org/specifications/x3d-namespace";

/// Def name of the shared portal-anchor appearance.
const ANCHOR_TEXTURE_DEF: &str = "_anchor_texture";

/// Build an X3D scene document from a decoded world.
///
/// Records map to scene content by type code, in record order:
///
/// ```text
/// ┌──────┬────────────────────────────────────────────────────────┐
/// │ Code │ Scene contribution                                     │
/// ├──────┼────────────────────────────────────────────────────────┤
/// │ WRLD │ root id / title / altSrc (| unescaped to :)            │
/// │ NEN3 │ root altImg, when the record names the "Viewer"        │
/// │ HEAD │ nothing (container metadata)                           │
/// │ CON3 │ connector registry entry (vals), first write wins      │
/// │ ACTR │ viewport                                               │
/// │ STCL │ appearance def STCL<id>, material from sred/sgrn/sblu  │
/// │ TXTR │ appearance def TXTR<id>, imagetexture from urln        │
/// │ BOX3 │ box shape, scaled between two connector points         │
/// │ COL3 │ cylinder shape, radius widt                            │
/// │ FLR3 │ box slab, thickness thik, vertical offset plny         │
/// │ PORT │ anchored sphere linking to wrul                        │
/// │ else │ an "unsupported" comment                               │
/// └──────┴────────────────────────────────────────────────────────┘
/// ```
///
/// Geometry positions resolve through the connector registry via the
/// record's `cn3s` references, so CON3 records must precede their
/// users, which is how world files are laid out.
#[must_use]
pub fn build_scene(model: &WorldModel) -> Element {
    SceneBuilder::default().build(model)
}

#[derive(Default)]
struct SceneBuilder {
    /// CON3 id → connector point, first definition wins.
    connectors: BTreeMap<u64, Vec<f64>>,
    /// Def names of appearances declared so far, in declaration order.
    appearance_defs: Vec<String>,
    anchor_texture_added: bool,
}

/// Root metadata accumulated from WRLD / NEN3 records.
#[derive(Default)]
struct WorldMeta {
    id: Option<String>,
    title: Option<String>,
    alt_src: Option<String>,
    alt_img: Option<String>,
}

impl SceneBuilder {
    fn build(mut self, model: &WorldModel) -> Element {
        let mut meta = WorldMeta::default();
        let mut collision = Element::new("collision").child(
            Element::new("background")
                .attr("groundColor", "0.2 0.2 0.2")
                .attr("skyColor", "0.8 0.8 0.98"),
        );

        for record in &model.records {
            match record.type_code.as_bytes() {
                b"HEAD" => {}
                b"WRLD" => {
                    meta.id = record.text(b"wlnm");
                    meta.title = record.text(b"irtc");
                    meta.alt_src = record.text(b"iref").map(|url| url.replace('|', ":"));
                }
                b"NEN3" => {
                    if record.text(b"name").as_deref() == Some("Viewer") {
                        meta.alt_img = record.text(b"icon");
                    }
                }
                b"CON3" => {
                    if let Some(vals) = record.doubles(b"vals") {
                        self.connectors
                            .entry(record.numeric_id)
                            .or_insert_with(|| vals.to_vec());
                    }
                }
                b"ACTR" => collision.push(Element::new("viewport")),
                b"STCL" => {
                    let material = Element::new("material").attr(
                        "diffuseColor",
                        format!(
                            "{} {} {}",
                            record.double(b"sred").unwrap_or(0.0),
                            record.double(b"sgrn").unwrap_or(0.0),
                            record.double(b"sblu").unwrap_or(0.0)
                        ),
                    );
                    self.push_appearance(
                        &mut collision,
                        format!("STCL{}", record.numeric_id),
                        material,
                    );
                }
                b"TXTR" => {
                    let url = abs_url(
                        base_dir(meta.alt_src.as_deref()),
                        &record.text(b"urln").unwrap_or_default(),
                    );
                    let texture = Element::new("imagetexture").attr("url", url);
                    self.push_appearance(
                        &mut collision,
                        format!("TXTR{}", record.numeric_id),
                        texture,
                    );
                }
                _ => self.push_geometry(&mut collision, record, base_dir(meta.alt_src.as_deref())),
            }
        }

        let mut root = Element::new("x3d").attr("xmlns", X3D_NS);
        if let Some(id) = &meta.id {
            root.set_attr("id", id);
        }
        if let Some(title) = &meta.title {
            root.set_attr("title", title);
        }
        if let Some(alt_src) = &meta.alt_src {
            root.set_attr("altSrc", alt_src);
        }
        if let Some(alt_img) = &meta.alt_img {
            root.set_attr("altImg", alt_img);
        }
        root.push(Element::new("scene").child(collision));
        root
    }

    /// Declare a def'd appearance in the collision group and remember
    /// its name for later `use` references.
    fn push_appearance(&mut self, collision: &mut Element, def: String, inner: Element) {
        collision.push(Element::new("appearance").attr("def", def.clone()).child(inner));
        self.appearance_defs.push(def);
    }

    fn push_geometry(
        &mut self,
        collision: &mut Element,
        record: &DecodedRecord,
        base: Option<String>,
    ) {
        // Resolve connector references; unknown ids are skipped, as the
        // registry only knows CON3 records seen so far.
        let connectors: Vec<[f64; 3]> = record
            .ints(b"cn3s")
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| u64::try_from(id).ok())
            .filter_map(|id| self.connectors.get(&id))
            .map(|vals| point3(vals))
            .collect();
        let start = connectors.first().copied();
        let end = connectors.get(1).copied();

        let mut transform = Element::new("transform").attr(
            "translation",
            start.map_or_else(|| "0 0 0".to_string(), fmt_point),
        );
        let mut shape = Element::new("shape");
        if let Some(name) = record.text(b"obnm") {
            shape.set_attr("id", name);
        }

        let mut appearance_use: Option<String> = None;
        let mut anchor: Option<Element> = None;

        match record.type_code.as_bytes() {
            b"BOX3" => {
                shape.push(Element::new("box").attr("solid", "true"));
                if let (Some(s), Some(e)) = (start, end) {
                    let scale = [
                        (e[0] - s[0]) / 2.0,
                        (e[1] - s[1]) / 2.0,
                        (e[2] - s[2]) / 2.0,
                    ];
                    transform.set_attr("scale", fmt_point(scale));
                }
            }
            b"COL3" => {
                shape.push(
                    Element::new("cylinder")
                        .attr("radius", record.double(b"widt").unwrap_or(1.0).to_string())
                        .attr("solid", "false"),
                );
                if let (Some(s), Some(e)) = (start, end) {
                    transform.set_attr("scale", format!("0 {} 0", e[1] - s[1]));
                }
            }
            b"FLR3" => {
                shape.push(Element::new("box").attr("solid", "true"));
                transform.set_attr(
                    "scale",
                    format!("1 1 {}", record.double(b"thik").unwrap_or(1.0)),
                );
                let mut at = start.unwrap_or_default();
                at[2] += record.double(b"plny").unwrap_or(0.0);
                transform.set_attr("translation", fmt_point(at));
            }
            b"PORT" => {
                shape.push(Element::new("sphere").attr("solid", "true"));
                let url = abs_url(base, &record.text(b"wrul").unwrap_or_default());
                anchor = Some(Element::new("anchor").attr("url", url));
                transform.set_attr(
                    "translation",
                    fmt_point(start.unwrap_or([0.0, 1.5, 0.0])),
                );

                if !self.anchor_texture_added {
                    collision.push(
                        Element::new("appearance")
                            .attr("id", ANCHOR_TEXTURE_DEF)
                            .attr("def", ANCHOR_TEXTURE_DEF)
                            .child(
                                Element::new("material")
                                    .attr("emissiveColor", "0 0 1")
                                    .attr("transparency", "0.4"),
                            ),
                    );
                    self.anchor_texture_added = true;
                }
                appearance_use = Some(ANCHOR_TEXTURE_DEF.to_string());
            }
            _ => {
                collision.push_comment(format!(
                    "Unsupported element type {}",
                    record.type_code
                ));
                return;
            }
        }

        // Shapes without their own appearance reuse the most recently
        // declared one.
        let appearance_use = appearance_use.or_else(|| self.appearance_defs.last().cloned());
        if let Some(def) = appearance_use {
            shape.push(Element::new("appearance").attr("use", def));
        }

        if let Some(mut anchor) = anchor {
            anchor.push(shape);
            transform.push(anchor);
        } else {
            transform.push(shape);
        }
        collision.push(transform);
    }
}

/// First three connector components, zero-padded.
fn point3(vals: &[f64]) -> [f64; 3] {
    let mut point = [0.0; 3];
    for (slot, value) in point.iter_mut().zip(vals) {
        *slot = *value;
    }
    point
}

fn fmt_point(p: [f64; 3]) -> String {
    format!("{} {} {}", p[0], p[1], p[2])
}

/// Directory part of the world's source URL, if one is set.
fn base_dir(alt_src: Option<&str>) -> Option<String> {
    alt_src.and_then(|url| url.rsplit_once('/').map(|(dir, _)| dir.to_string()))
}

/// Resolve a resource reference against the world's base directory.
fn abs_url(base: Option<String>, rel: &str) -> String {
    match base {
        Some(base) if !base.is_empty() => format!("{base}/{rel}"),
        _ => rel.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use aer_types::Value;
    use aer_wire::Fourcc;

    use super::*;

    fn record(code: &[u8; 4], id: u64, index: usize) -> DecodedRecord {
        DecodedRecord::new(index, Fourcc::new(*code), id)
    }

    fn model(records: Vec<DecodedRecord>) -> WorldModel {
        WorldModel {
            header: String::new(),
            records,
            urls: BTreeSet::new(),
        }
    }

    fn text(s: &str) -> Value {
        Value::Text(s.as_bytes().to_vec())
    }

    #[test]
    fn wrld_record_sets_root_attributes() {
        let mut wrld = record(b"WRLD", 0, 0);
        wrld.insert(Fourcc::new(*b"wlnm"), text("castle"));
        wrld.insert(Fourcc::new(*b"irtc"), text("The Castle"));
        wrld.insert(Fourcc::new(*b"iref"), text("http|//host/worlds/castle.aer"));

        let scene = build_scene(&model(vec![wrld]));
        assert_eq!(scene.get_attr("id"), Some("castle"));
        assert_eq!(scene.get_attr("title"), Some("The Castle"));
        assert_eq!(scene.get_attr("altSrc"), Some("http://host/worlds/castle.aer"));
    }

    #[test]
    fn viewer_nen3_sets_alt_img() {
        let mut nen = record(b"NEN3", 1, 0);
        nen.insert(Fourcc::new(*b"name"), text("Viewer"));
        nen.insert(Fourcc::new(*b"icon"), Value::Url(b"icon.png".to_vec()));

        let scene = build_scene(&model(vec![nen]));
        assert_eq!(scene.get_attr("altImg"), Some("icon.png"));
    }

    #[test]
    fn non_viewer_nen3_is_ignored() {
        let mut nen = record(b"NEN3", 1, 0);
        nen.insert(Fourcc::new(*b"name"), text("Other"));
        nen.insert(Fourcc::new(*b"icon"), Value::Url(b"icon.png".to_vec()));

        let scene = build_scene(&model(vec![nen]));
        assert_eq!(scene.get_attr("altImg"), None);
    }

    #[test]
    fn box_between_two_connectors_is_translated_and_scaled() {
        let mut con_a = record(b"CON3", 10, 0);
        con_a.insert(Fourcc::new(*b"vals"), Value::DoubleList(vec![1.0, 2.0, 3.0]));
        let mut con_b = record(b"CON3", 11, 1);
        con_b.insert(Fourcc::new(*b"vals"), Value::DoubleList(vec![5.0, 6.0, 7.0]));
        let mut boxr = record(b"BOX3", 1, 2);
        boxr.insert(Fourcc::new(*b"cn3s"), Value::IntList(vec![10, 11]));

        let xml = build_scene(&model(vec![con_a, con_b, boxr])).to_xml();
        assert!(xml.contains("translation=\"1 2 3\""));
        assert!(xml.contains("scale=\"2 2 2\""));
        assert!(xml.contains("<box solid=\"true\"/>"));
    }

    #[test]
    fn duplicate_con3_id_keeps_first_definition() {
        let mut first = record(b"CON3", 10, 0);
        first.insert(Fourcc::new(*b"vals"), Value::DoubleList(vec![1.0, 1.0, 1.0]));
        let mut second = record(b"CON3", 10, 1);
        second.insert(Fourcc::new(*b"vals"), Value::DoubleList(vec![9.0, 9.0, 9.0]));
        let mut boxr = record(b"BOX3", 1, 2);
        boxr.insert(Fourcc::new(*b"cn3s"), Value::IntList(vec![10]));

        let xml = build_scene(&model(vec![first, second, boxr])).to_xml();
        assert!(xml.contains("translation=\"1 1 1\""));
    }

    #[test]
    fn cylinder_takes_its_radius_from_widt() {
        let mut col = record(b"COL3", 1, 0);
        col.insert(Fourcc::new(*b"widt"), Value::Double(2.5));

        let xml = build_scene(&model(vec![col])).to_xml();
        assert!(xml.contains("<cylinder radius=\"2.5\" solid=\"false\"/>"));
    }

    #[test]
    fn material_appearance_from_stcl() {
        let mut stcl = record(b"STCL", 4, 0);
        stcl.insert(Fourcc::new(*b"sred"), Value::Double(1.0));
        stcl.insert(Fourcc::new(*b"sblu"), Value::Double(0.5));

        let xml = build_scene(&model(vec![stcl])).to_xml();
        assert!(xml.contains("<appearance def=\"STCL4\">"));
        assert!(xml.contains("diffuseColor=\"1 0 0.5\""));
    }

    #[test]
    fn texture_url_resolves_against_world_base() {
        let mut wrld = record(b"WRLD", 0, 0);
        wrld.insert(Fourcc::new(*b"iref"), text("http|//host/worlds/castle.aer"));
        let mut txtr = record(b"TXTR", 2, 1);
        txtr.insert(Fourcc::new(*b"urln"), Value::Url(b"wall.png".to_vec()));

        let xml = build_scene(&model(vec![wrld, txtr])).to_xml();
        assert!(xml.contains("url=\"http://host/worlds/wall.png\""));
    }

    #[test]
    fn shape_reuses_latest_appearance() {
        let mut stcl = record(b"STCL", 4, 0);
        stcl.insert(Fourcc::new(*b"sred"), Value::Double(1.0));
        let boxr = record(b"BOX3", 1, 1);

        let xml = build_scene(&model(vec![stcl, boxr])).to_xml();
        assert!(xml.contains("<appearance use=\"STCL4\"/>"));
    }

    #[test]
    fn portal_is_an_anchored_sphere_with_shared_texture() {
        let mut port_a = record(b"PORT", 1, 0);
        port_a.insert(Fourcc::new(*b"wrul"), Value::Url(b"next.aer".to_vec()));
        let mut port_b = record(b"PORT", 2, 1);
        port_b.insert(Fourcc::new(*b"wrul"), Value::Url(b"other.aer".to_vec()));

        let xml = build_scene(&model(vec![port_a, port_b])).to_xml();
        assert!(xml.contains("<anchor url=\"next.aer\">"));
        assert!(xml.contains("<sphere solid=\"true\"/>"));
        // Default portal position
        assert!(xml.contains("translation=\"0 1.5 0\""));
        // The shared appearance is declared exactly once
        assert_eq!(xml.matches("def=\"_anchor_texture\"").count(), 1);
        assert_eq!(xml.matches("use=\"_anchor_texture\"").count(), 2);
    }

    #[test]
    fn floor_offsets_vertically_by_plny() {
        let mut con = record(b"CON3", 1, 0);
        con.insert(Fourcc::new(*b"vals"), Value::DoubleList(vec![1.0, 2.0, 3.0]));
        let mut flr = record(b"FLR3", 1, 1);
        flr.insert(Fourcc::new(*b"cn3s"), Value::IntList(vec![1]));
        flr.insert(Fourcc::new(*b"thik"), Value::Double(0.5));
        flr.insert(Fourcc::new(*b"plny"), Value::Double(2.0));

        let xml = build_scene(&model(vec![con, flr])).to_xml();
        assert!(xml.contains("scale=\"1 1 0.5\""));
        assert!(xml.contains("translation=\"1 2 5\""));
    }

    #[test]
    fn unsupported_type_becomes_a_comment() {
        let rec = record(b"GRP3", 9, 0);
        let xml = build_scene(&model(vec![rec])).to_xml();
        assert!(xml.contains("<!-- Unsupported element type GRP3 -->"));
    }

    #[test]
    fn shape_id_comes_from_obnm() {
        let mut boxr = record(b"BOX3", 1, 0);
        boxr.insert(Fourcc::new(*b"obnm"), text("crate01"));
        let xml = build_scene(&model(vec![boxr])).to_xml();
        assert!(xml.contains("<shape id=\"crate01\">"));
    }
}
