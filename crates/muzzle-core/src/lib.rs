//! # Muzzle Core
//!
//! The decision core for group mute/unmute moderation bots.
//!
//! Muzzle gives an LLM-driven assistant (or a plain command surface) the
//! ability to mute and unmute group members through whatever chat gateway
//! hosts it. The gateway, the plugin host, and the LLM integration stay
//! outside this crate, reached only through the [`GroupGateway`] trait.
//!
//! ## Pipeline
//!
//! Every incoming event flows through four stages:
//!
//! ```text
//! ┌───────────┐    ┌──────────┐    ┌───────────┐    ┌──────────┐
//! │ Directive │───▶│  Target  │───▶│   Auth    │───▶│  Action  │
//! │  Parser   │    │ Resolver │    │  Engine   │    │ Executor │
//! └───────────┘    └──────────┘    └───────────┘    └──────────┘
//!   command or       mention or      per-target       gateway call
//!   【mute …】        name lookup     allow/deny       + report line
//! ```
//!
//! Two entry points drive the pipeline:
//! - [`pipeline::handle_command`] for `/mute` and `/unmute` invocations;
//! - [`pipeline::handle_outgoing_text`] for the passive hook that scans the
//!   bot's own replies for embedded `【mute @name seconds】` directives.
//!
//! Targets are always decided independently: one unresolved mention or one
//! failed gateway call never disturbs the rest of the batch, and the final
//! report keeps the original target order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use muzzle_core::{CommandEvent, MessagePart, Policy, pipeline};
//!
//! let parts = vec![
//!     MessagePart::Text("/mute 120 ".into()),
//!     MessagePart::At("10001".into()),
//! ];
//! let event = CommandEvent { sender_id: "900", group_id: "g1", parts: &parts };
//! if let Some(report) = pipeline::handle_command(&gateway, &policy, &event).await {
//!     println!("{report}");
//! }
//! ```

pub mod authorize;
pub mod command;
pub mod directive;
pub mod execute;
pub mod gateway;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod resolve;
pub mod segment;

pub use authorize::decide;
pub use command::{CommandEvent, parse_command};
pub use directive::{DirectiveMatch, parse_directives, scan};
pub use execute::{DecidedTarget, execute, render_report};
pub use gateway::{GatewayError, GatewayResult, GroupGateway, RosterEntry};
pub use model::{
    ActionOutcome, Decision, MemberRole, MuteAction, MuteRequest, ReasonCode, Resolution,
    ResolvedTarget, TargetRef,
};
pub use pipeline::{handle_command, handle_outgoing_text, process_request};
pub use policy::Policy;
pub use resolve::resolve_targets;
pub use segment::{MessagePart, Token, shell_split, tokenize};
