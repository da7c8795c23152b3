//! Path rewriting for the embedded tool and the image fallback proxy.
//!
//! - `session` - Session affinity inferred from the `Referer`
//! - `redirect` - Redirect target composition
//! - `assets` - Streaming fallback fetch for missing images

mod assets;
mod redirect;
mod session;

pub use assets::{AssetProxy, sanitize_asset_path};
pub use redirect::redirect_target;
pub use session::SessionMatcher;
