//! Bot backend: Discord command surface, background jobs, business logic and storage.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Gateway event handlers, slash/prefix commands and components
//! - **Controller Layer** (`controller/`) - Read-only HTTP API over vote and mention history
//! - **Service Layer** (`service/`) - Business logic between the surfaces and the data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types, chat replies and HTTP responses
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, Discord HTTP, settings, timers)
//! - **Startup** (`startup`) - Database connection and publisher setup
//! - **Router** (`router`) - Axum routes and API documentation
//! - **Scheduler** (`scheduler/`) - Event poll cron job and vote conclusion timers
//! - **Util** (`util/`) - Discord helpers, id parsing and retry with backoff
//!
//! # Vote Flow
//!
//! 1. **Command** `/vote_draft` saves a draft through `ProposalService`
//! 2. **Command** `/publish_draft` posts the vote thread through `VoteService` and arms a timer
//! 3. **Scheduler** fires when the window closes and calls `VoteService::conclude`
//! 4. **Service** tallies reactions, stores the result and submits passed proposals to the ledger

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
