#![warn(clippy::pedantic)]

pub mod dump;
pub mod html;
pub mod markup;
pub mod x3d;

use aer_decoder::WorldModel;

/// Output formats for a decoded world.
///
/// ```text
/// ┌──────┬──────────────────────────────────────────────────┐
/// │ Mode │ Output                                           │
/// ├──────┼──────────────────────────────────────────────────┤
/// │ X3d  │ X3D scene document                               │
/// │ Html │ XHTML page embedding the X3D scene               │
/// │ Dump │ plain-text record listing plus the URL set       │
/// └──────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    X3d,
    Html,
    Dump,
}

/// Render a decoded world in the requested mode.
#[must_use]
pub fn render(model: &WorldModel, mode: OutputMode) -> String {
    match mode {
        OutputMode::X3d => x3d::build_scene(model).to_document_string(),
        OutputMode::Html => html::build_page(&x3d::build_scene(model)).to_document_string(),
        OutputMode::Dump => dump::render_dump(model),
    }
}
