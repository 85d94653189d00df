//! Embeddable highlighted-document widget.
//!
//! The shell around the compositor: an editable text surface, the active
//! display font, and a display sink receiving composited markup. Everything
//! UI-toolkit-specific (sizing synchronization, style mirroring, input event
//! wiring) stays with the host; the shell only forwards text, font, and
//! change notifications in and markup out.

mod doc;
mod surface;

pub use doc::{DisplaySink, MarkupBuffer, TextDoc};
pub use surface::EditSurface;
