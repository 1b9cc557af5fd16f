pub mod tools_env;
