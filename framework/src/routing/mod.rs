mod macros;
mod router;

pub use macros::{validate_route_path, GroupDef, HttpMethod, RouteDef};
pub use router::{
    register_route_name, route, route_with_params, BoxedHandler, RouteBuilder, Router,
};
