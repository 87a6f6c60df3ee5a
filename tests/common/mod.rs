pub use hadoop_provider_test_utils::{init_tracing, with_timeout};
