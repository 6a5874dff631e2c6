/*!
 * Translation layer over the provider clients.
 *
 * - `client`: error-contained batched translation with retry and fallback
 * - `page`: per-page orchestration of extraction and translation
 */

pub use self::client::TranslationClient;
pub use self::page::PageTranslator;

pub mod client;
pub mod page;
