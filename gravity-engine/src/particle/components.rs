// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Planar kinematic components
//!
//! Position, velocity and acceleration of a particle in the simulation plane,
//! plus the opaque color payload carried for the renderer. All quantities are
//! double precision and expressed in simulation units.

use rand::Rng;

/// 2D position component
///
/// # Examples
///
/// ```
/// use gravity_engine::particle::Position;
///
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(3.0, 4.0);
/// assert_eq!(a.distance_to(&b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Displacement vector `(dx, dy)` pointing from `self` to `other`
    pub fn displacement_to(&self, other: &Position) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let (dx, dy) = self.displacement_to(other);
        dx.hypot(dy)
    }

    /// Advance the position by `velocity * dt`
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.dx * dt;
        self.y += velocity.dy * dt;
    }
}

/// 2D velocity component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Create a velocity of the given speed along `angle` (radians from +x)
    pub fn from_polar(speed: f64, angle: f64) -> Self {
        Velocity::new(speed * angle.cos(), speed * angle.sin())
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Set the x component
    pub fn set_dx(&mut self, dx: f64) {
        self.dx = dx;
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Calculate the magnitude (speed) of the velocity vector
    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Apply a kick of `acceleration * dt`
    pub fn kick(&mut self, acceleration: &Acceleration, dt: f64) {
        self.dx += acceleration.ax * dt;
        self.dy += acceleration.ay * dt;
    }
}

/// 2D acceleration component
///
/// Derived every step from the gravitational field; never carried over as
/// state between steps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    ax: f64,
    ay: f64,
}

impl Acceleration {
    /// Create a new acceleration with the given components
    pub fn new(ax: f64, ay: f64) -> Self {
        Acceleration { ax, ay }
    }

    /// Create a zero acceleration
    pub fn zero() -> Self {
        Acceleration::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn ax(&self) -> f64 {
        self.ax
    }

    /// Get the y component
    pub fn ay(&self) -> f64 {
        self.ay
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite()
    }

    /// Add another acceleration to this one
    pub fn add(&mut self, ax: f64, ay: f64) {
        self.ax += ax;
        self.ay += ay;
    }

    /// Calculate the magnitude of the acceleration vector
    pub fn magnitude(&self) -> f64 {
        self.ax.hypot(self.ay)
    }
}

/// RGB color carried for the renderer; physics never looks at it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure red
    pub const RED: Color = Color::new(255, 0, 0);
    /// Pure green
    pub const GREEN: Color = Color::new(0, 255, 0);
    /// Pure blue
    pub const BLUE: Color = Color::new(0, 0, 255);
    /// White
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Yellow
    pub const YELLOW: Color = Color::new(255, 255, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Draw a uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color::new(rng.gen(), rng.gen(), rng.gen())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
