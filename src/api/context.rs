use lambda_runtime::Context;

use crate::core::models::InvocationContext;

impl From<&Context> for InvocationContext {
    fn from(ctx: &Context) -> Self {
        InvocationContext {
            request_id: ctx.request_id.clone(),
            function_name: ctx.env_config.function_name.clone(),
            function_version: ctx.env_config.version.clone(),
            memory_limit_in_mb: ctx.env_config.memory,
            deadline_ms: ctx.deadline,
        }
    }
}
