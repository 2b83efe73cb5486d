/*
 * Particle Field - Module Definitions
 *
 * This file defines the module structure for the particle field backdrop.
 * The simulation core (particle, pointer, field, simulator) has no window
 * dependency beyond the math and color types; the app, input and ui modules
 * host it inside a nannou window.
 */

// Re-export key components for easier access
pub use particle::Particle;
pub use pointer::PointerState;
pub use field::{Connection, ParticleField};
pub use spatial_grid::SpatialGrid;
pub use params::SimulationParams;
pub use error::ParamsError;
pub use render::{CanvasTransform, CommandBuffer, DrawCommand, NannouTarget, RenderTarget};
pub use frame::{FrameClock, FrameId, FrameQueue};
pub use simulator::Simulator;
pub use debug::DebugInfo;
pub use app::Model;

// Define modules
pub mod particle;
pub mod pointer;
pub mod field;
pub mod spatial_grid;
pub mod params;
pub mod error;
pub mod render;
pub mod frame;
pub mod simulator;
pub mod debug;
pub mod app;
pub mod ui;
pub mod input;

// Constants
pub const AREA_PER_PARTICLE: f32 = 9000.0;
pub const CONNECT_DISTANCE: f32 = 100.0;
pub const POINTER_RADIUS_DIVISOR: f32 = 80.0;
