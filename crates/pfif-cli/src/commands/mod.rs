pub mod canonical;
pub mod diff;

use pfif_core::StructuralDefect;

/// Print structural defects of one document as warnings on stderr.
pub fn warn_defects(label: &str, defects: &[StructuralDefect]) {
    for defect in defects {
        eprintln!("warning: {}: {}", label, defect);
    }
}
