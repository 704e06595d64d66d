//! Navigation logic for TabNav.
//!
//! This module contains [`panel::Panel`] and [`panel::PanelSet`], the
//! [`bookmark`] codec, the [`history`] adapter contract, the [`render`]
//! seam, the observable [`state`], and the [`controller::NavigationController`]
//! that ties them together.

pub mod bookmark;
pub mod controller;
pub mod history;
pub mod panel;
pub mod render;
pub mod state;
