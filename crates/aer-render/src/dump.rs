use std::fmt::Write as _;

use aer_decoder::WorldModel;

/// Plain-text listing of a decoded world.
///
/// One line per record (zero-padded index, type code, id, then the
/// decoded fields in tag order), with any warnings indented underneath,
/// a separator, and the sorted URL set:
///
/// ```text
/// 0000 WRLD 000 irtc="The Castle" wlnm="castle"
/// 0001 BOX3 001 urln="wall.png" widt=2
///      ! chunk truncated mid-field-header at offset 14
/// ----
/// ./Viewer.png
/// ./castle.ctl
/// wall.png
/// ```
#[must_use]
pub fn render_dump(model: &WorldModel) -> String {
    let mut out = String::new();

    for record in &model.records {
        let _ = write!(
            out,
            "{:04} {} {:03} ",
            record.index, record.type_code, record.numeric_id
        );
        for (i, (tag, value)) in record.fields.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{tag}={value}");
        }
        out.push('\n');
        for warning in &record.warnings {
            let _ = writeln!(out, "     ! {warning}");
        }
    }

    out.push_str("----\n");
    for url in &model.urls {
        let _ = writeln!(out, "{url}");
    }
    out
}
