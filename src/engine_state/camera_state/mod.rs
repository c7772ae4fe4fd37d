//! # Camera State Management
//!
//! This module handles all camera-related functionality:
//! - Camera position and yaw/pitch orientation tracking
//! - Direction vectors used for walking and for the selection ray
//! - View and projection matrix calculations for render backends
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix

pub mod camera;

pub use camera::{Camera, Projection};
