//! Bridges a job scheduler and a calendar service to a chat bot that reads
//! `##gbStart##<tag>##splitKeyValue##<payload>##gbEnd##` lines from stdout.

pub mod calendar;
pub mod calendar_api;
pub mod cli;
pub mod error;
pub mod ext;
pub mod http;
pub mod jobs;
pub mod model;
pub mod render;
pub mod run;
pub mod scheduler_api;
pub mod util;
pub mod window;
