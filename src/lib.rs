pub mod config;
pub mod error;
pub mod geom;
pub mod interp;
pub mod io;

// Prelude
pub use config::InterpConfig;
pub use error::{InterpError, InterpResult};
pub use geom::point::{Point, Point2};
pub use geom::projection::Projection;
pub use interp::{
    FieldInterpolator, Grid, GridField, InterpMethod, PointSet, PrecomputedLinear, PrecomputedMap,
    Scattered, ScatteredInterpolator, Triangulation, strategy_for,
};
