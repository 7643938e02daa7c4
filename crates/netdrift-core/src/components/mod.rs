//! Network Components
//!
//! Nodes and the records they exchange: infos, vectors and transmissions.

pub mod behavior;
pub mod ids;
pub mod info;
pub mod node;
pub mod transmission;
pub mod vector;

pub use behavior::*;
pub use ids::*;
pub use info::Info;
pub use node::*;
pub use transmission::Transmission;
pub use vector::Vector;
