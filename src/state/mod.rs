pub mod camera;
pub mod selection;
pub mod style;

pub use selection::ListView;
pub use style::{Coverage, department_style, resolve_coverage};
