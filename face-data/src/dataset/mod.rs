//! Dataset adapters over the face and scene image collections.

mod background;
mod celeba;
mod concat;
mod csv_faces;
mod generic;
mod hand_labeled;
mod record;
mod room;
mod utils;

pub use background::*;
pub use celeba::*;
pub use concat::*;
pub use csv_faces::*;
pub use generic::*;
pub use hand_labeled::*;
pub use record::*;
pub use room::*;
pub use utils::*;
