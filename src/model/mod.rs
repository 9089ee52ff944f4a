/// Gene tree structure and ancestry operations
pub mod tree;
/// Tree vertices, gene labels, and event annotations
pub mod vertex;

pub use tree::GeneTree;
pub use tree::VertexIndex;
pub use vertex::Event;
pub use vertex::GeneLabel;
pub use vertex::Vertex;
