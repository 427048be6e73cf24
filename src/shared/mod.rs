//! Types shared between the window manager core and the X11 adapter.

pub mod vector;

pub use vector::Vector2D;
