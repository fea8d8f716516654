pub mod chrome_session;
pub mod session;

pub use chrome_session::{ChromeElement, ChromeSession, SessionOrigin};
pub use session::{BrowserSession, PageElement, QueryScope};
