//! Use-Cases der Karten-Ansicht. Alle laufen auf dem Worker-Thread der Karte.

pub mod animate;
pub mod conferences;
pub mod draw;
pub mod granularity;
pub mod hover;
pub mod populate;
pub mod refresh;
pub mod selection;
