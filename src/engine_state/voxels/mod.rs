//! # Voxel World Core
//!
//! This module contains the data side of the voxel world: what a block is, how
//! blocks are grouped into chunks, how chunks are generated, and the world
//! store that owns them.
//!
//! ## Architecture
//!
//! * **Block**: The immutable catalog of block kinds and the six block sides
//! * **Chunk**: Fixed-size 16x128x16 columns of blocks with mesh bookkeeping
//! * **Generation**: The terrain generator capability and the shipped generators
//! * **Pending edits**: Edits waiting for their chunk to load
//! * **World**: The sparse chunk store with streaming around the viewer
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. Edits land in the owning chunk, or in the pending log if it is not loaded
//! 3. Edited chunks (and neighbours across a border) are flagged dirty
//! 4. Dirty chunks are meshed in parallel and uploaded on the next update
//!
//! ## Thread Safety
//!
//! * The mesh phase reads chunks through a shared borrow only
//! * Every mutation goes through `&mut World`, so it cannot overlap the mesh phase

pub mod block;
pub mod chunk;
pub mod generation;
pub mod pending_edits;
pub mod world;
