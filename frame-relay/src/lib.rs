//! # iotframe-relay
//!
//! HTTP relay that pairs two devices and hands the most recent image
//! between them.
//!
//! This crate implements a relay server that:
//! - Issues identities to at most two devices holding the shared key
//! - Links the two devices to each other as peers
//! - Stores each device's last upload on disk and shows it to the peer
//! - Tracks whether the peer has seen that upload
//!
//! ## Architecture
//!
//! ```text
//! Device A ──┐                    ┌── Device B
//!            │     HTTP/JSON      │
//!            ├───────────────────►│
//!            │                    │
//!        ┌───┴────────────────────┴───┐
//!        │       iotframe-relay       │
//!        │  ┌──────────┐ ┌────────┐   │
//!        │  │ Registry │ │ images │   │
//!        │  └──────────┘ └────────┘   │
//!        └────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! - `GET  /iotframe/api/uuid` (`Key` header) → new identity
//! - `GET  /iotframe/api/image` (`Uuid` header) → peer's last image
//! - `POST /iotframe/api/image/post` (`Uuid` header) → upload an image
//! - `GET  /iotframe/api/seen` (`Uuid` header) → was my image seen
//! - `POST /iotframe/api/seen/post` (`Uuid` header) → mark peer's image seen
//! - `GET  /images/:name` → stored image bytes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod http;
pub mod registry;
pub mod server;
pub mod storage;
