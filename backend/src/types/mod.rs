mod created;
mod environment;
mod error;
mod extractors;
mod lenient;

pub use created::Created;
pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
pub use extractors::{AdminSession, JsonBody, QueryParams};
pub use lenient::optional_string;
