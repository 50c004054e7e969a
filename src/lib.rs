pub mod canvas;
pub mod chart;
pub mod icon_gen;
