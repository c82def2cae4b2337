//! # TTML Subtitles: Reading and Writing Timed Text Markup Language Subtitles
//!
//! This crate converts between a simple, format-agnostic subtitle container
//! ([`Subtitles`]) and TTML documents. Its core is the time-code codec: TTML
//! timestamps may be written either as clock time (`hh:mm:ss.mmm`) or as clock
//! time plus a frame offset (`hh:mm:ss:fff`) that depends on the document-level
//! `ttp:frameRate`.
//!
//! The primary functions are:
//! - [`parse_ttml`]: decodes TTML bytes into [`Subtitles`], resolving frame-based
//!   timestamps against the document frame rate.
//! - [`generate_ttml`]: encodes [`Subtitles`] as TTML, always using clock time.
//!
//! For full access to regions, styles, cue ids and span styles, use
//! [`parse_document`] and [`generate_document`] with a [`TtmlDocument`].
//!
//! ## Round-trip guarantees
//!
//! Reading and then writing a document preserves cue order, text lines and the
//! effective start/end durations. It does **not** preserve bytes: frame-based
//! timestamps are re-emitted as `hh:mm:ss.mmm`, and [`generate_ttml`] never
//! writes a frame rate, regions or styles.
//!
//! ## Examples
//!
//! ```rust
//! use std::time::Duration;
//! use ttml_subtitles::{TtmlGenerationOptions, generate_ttml, parse_ttml};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = r#"
//!     <tt xmlns="http://www.w3.org/ns/ttml"
//!         xmlns:ttp="http://www.w3.org/ns/ttml#parameter"
//!         ttp:frameRate="25">
//!       <body>
//!         <div>
//!           <p begin="00:00:01:10" end="00:00:02.500">
//!             <span>hello</span>
//!           </p>
//!         </div>
//!       </body>
//!     </tt>
//!     "#;
//!
//!     let subtitles = parse_ttml(content.as_bytes())?;
//!     let cue = &subtitles.items[0];
//!
//!     // 1s + 10 frames at 25 fps
//!     assert_eq!(cue.start_at, Duration::from_millis(1400));
//!     assert_eq!(cue.end_at, Duration::from_millis(2500));
//!     assert_eq!(cue.text, vec!["hello"]);
//!
//!     let generated = generate_ttml(&subtitles, &TtmlGenerationOptions::default())?;
//!     let generated = String::from_utf8(generated)?;
//!     assert!(generated.contains(r#"<p begin="00:00:01.400" end="00:00:02.500">"#));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
mod schema;
pub mod timecode;
pub mod types;

pub use config::{TtmlGenerationOptions, TtmlGenerationOptionsBuilder};
pub use error::{TimecodeError, TtmlError};
pub use generator::{generate_document, generate_ttml, write_ttml};
pub use parser::{parse_document, parse_ttml};
pub use timecode::{ResolvedTimecode, Timecode, format_clock_time};
pub use types::{CueElement, Subtitle, Subtitles, TextSpan, TtmlDocument, TtmlRegion, TtmlStyle};
