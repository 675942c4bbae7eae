pub mod bboxes;
pub mod point;
pub mod projection;
pub mod triangles;
pub mod vector;
