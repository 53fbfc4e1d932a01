//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only lists them.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::ConvertContentsTool;
use crate::domains::conversion::RequestAdapter;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(adapter: RequestAdapter) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(ConvertContentsTool::create_route(adapter))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domains::conversion::converter::tests::install_fake_pandoc;
    use crate::domains::conversion::{FooterPolicy, PandocConverter};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct TestServer {}

    fn test_adapter(dir: &TempDir) -> RequestAdapter {
        let converter =
            PandocConverter::new(install_fake_pandoc(dir.path()), FooterPolicy::default())
                .unwrap();
        RequestAdapter::new(Arc::new(converter))
    }

    #[test]
    fn test_build_router() {
        let dir = TempDir::new().unwrap();
        let router: ToolRouter<TestServer> = build_tool_router(test_adapter(&dir));
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name.as_ref(), "convert_contents");
    }
}
