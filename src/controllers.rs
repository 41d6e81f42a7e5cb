use crate::go::{go_var_name, import_block, local_import, write_banner, ToGo, GIN_IMPORT};
use crate::schema::{GenConfig, Method, Route, Schema};
use itertools::Itertools;
use std::io::Write;
use tracing::{debug, info};

const NOT_FOUND: &str = r#"c.JSON(http.StatusNotFound, gin.H{"error": "Record not found!"})"#;
const BAD_REQUEST: &str = r#"c.JSON(http.StatusBadRequest, gin.H{"error": err.Error()})"#;

impl ToGo for Route {
    fn to_go_ref(&self) -> String {
        format!("controllers.{}", self.controller)
    }

    fn to_go_decl(&self) -> String {
        let body = handler_body(self);
        if body.is_empty() {
            format!("func {}(c *gin.Context) {{\n}}", self.controller)
        } else {
            format!(
                "func {}(c *gin.Context) {{\n{}\n}}",
                self.controller,
                body.iter().map(|line| format!("\t{line}")).join("\n")
            )
        }
    }
}

fn bind_body(var: &str) -> Vec<String> {
    vec![
        format!("if err := c.ShouldBindJSON(&{var}); err != nil {{"),
        format!("\t{BAD_REQUEST}"),
        "\treturn".to_owned(),
        "}".to_owned(),
    ]
}

fn find_one(var: &str, param: &str) -> Vec<String> {
    vec![
        format!("if err := config.DB.First(&{var}, c.Param(\"{param}\")).Error; err != nil {{"),
        format!("\t{NOT_FOUND}"),
        "\treturn".to_owned(),
        "}".to_owned(),
    ]
}

/// Statements of the handler for `route`, without indentation.
fn handler_body(route: &Route) -> Vec<String> {
    let var = go_var_name(&route.model);
    let ty = format!("models.{}", route.model);
    let path = route.path_template();
    let param = path.lookup_param();
    let declare = format!("var {var} {ty}");

    match route.method() {
        Method::Post => [
            vec![declare],
            bind_body(&var),
            vec![
                format!("config.DB.Create(&{var})"),
                format!("c.JSON(http.StatusOK, &{var})"),
            ],
        ]
        .concat(),
        Method::Get if path.has_params() => [
            vec![declare],
            find_one(&var, param),
            vec![format!("c.JSON(http.StatusOK, &{var})")],
        ]
        .concat(),
        Method::Get => {
            let list = format!("{var}s");
            vec![
                format!("var {list} []{ty}"),
                format!("config.DB.Find(&{list})"),
                format!("c.JSON(http.StatusOK, &{list})"),
            ]
        }
        Method::Put => [
            vec![declare],
            find_one(&var, param),
            bind_body(&var),
            vec![
                format!("config.DB.Save(&{var})"),
                format!("c.JSON(http.StatusOK, &{var})"),
            ],
        ]
        .concat(),
        Method::Delete => vec![
            declare,
            format!("if err := config.DB.Delete(&{var}, c.Param(\"{param}\")).Error; err != nil {{"),
            format!("\t{NOT_FOUND}"),
            "\treturn".to_owned(),
            "}".to_owned(),
            format!(
                "c.JSON(http.StatusOK, gin.H{{\"message\": \"{} deleted\"}})",
                route.model
            ),
        ],
        Method::Other(_) => vec![],
    }
}

pub fn render_controller_go<'a>(
    config: &GenConfig,
    routes: impl IntoIterator<Item = &'a Route>,
) -> String {
    let imports = [
        "net/http".to_owned(),
        local_import(config, "config"),
        local_import(config, "models"),
        GIN_IMPORT.to_owned(),
    ];
    let mut out = format!("package controllers\n\n{}\n", import_block(&imports));
    for route in routes {
        out.push('\n');
        out.push_str(&route.to_go_decl());
        out.push('\n');
    }
    out
}

pub fn gen_controller_go(schema: &Schema, mut writer: impl Write) -> eyre::Result<()> {
    write_banner(&mut writer, "controller files", false)?;
    let mut handlers = 0;
    for model in schema.models.keys() {
        let routes = schema.routes_for(model).collect::<Vec<_>>();
        debug!(model = %model, routes = routes.len(), "rendering controller");
        handlers += routes.len();
        writeln!(writer)?;
        write!(writer, "{}", render_controller_go(&schema.generator, routes))?;
    }
    info!(
        count = schema.models.len(),
        handlers, "generated controller files"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_schema_str;

    fn handler(path: &str, method: &str, controller: &str) -> String {
        Route::new(path, method, controller, "User").to_go_decl()
    }

    #[test]
    fn test_get_collection_lists_records() {
        let out = handler("/users", "GET", "GetUsers");
        assert_eq!(
            out,
            "func GetUsers(c *gin.Context) {\n\tvar users []models.User\n\tconfig.DB.Find(&users)\n\tc.JSON(http.StatusOK, &users)\n}"
        );
        assert!(!out.contains("First("));
    }

    #[test]
    fn test_get_with_param_looks_up_one_record() {
        let out = handler("/users/{id}", "GET", "GetUser");
        assert!(out.starts_with("func GetUser(c *gin.Context) {\n\tvar user models.User\n"));
        assert!(out.contains("config.DB.First(&user, c.Param(\"id\")).Error"));
        assert!(out.contains("http.StatusNotFound"));
        assert!(!out.contains("Find("));
    }

    #[test]
    fn test_get_param_detection_is_not_positional() {
        // brace before and after the seventh character
        assert!(handler("/u/{id}", "GET", "GetUser").contains("First("));
        assert!(handler("/users/profile/{id}", "GET", "GetUser").contains("First("));
        // a brace that is not a whole segment
        assert!(handler("/users/{}", "GET", "GetUsers").contains("Find("));
        assert!(handler("/users", "GET", "GetUsers").contains("Find("));
        assert!(handler("", "GET", "GetUsers").contains("Find("));
    }

    #[test]
    fn test_lookup_uses_declared_param_name() {
        let out = handler("/users/{user_id}", "PUT", "UpdateUser");
        assert!(out.contains("c.Param(\"user_id\")"));
    }

    #[test]
    fn test_post_binds_and_creates() {
        let out = handler("/users", "POST", "CreateUser");
        assert_eq!(
            out,
            "func CreateUser(c *gin.Context) {\n\
             \tvar user models.User\n\
             \tif err := c.ShouldBindJSON(&user); err != nil {\n\
             \t\tc.JSON(http.StatusBadRequest, gin.H{\"error\": err.Error()})\n\
             \t\treturn\n\
             \t}\n\
             \tconfig.DB.Create(&user)\n\
             \tc.JSON(http.StatusOK, &user)\n\
             }"
        );
    }

    #[test]
    fn test_put_looks_up_then_binds_then_saves() {
        let out = handler("/users/{id}", "PUT", "UpdateUser");
        let first = out.find("config.DB.First").unwrap();
        let bind = out.find("ShouldBindJSON").unwrap();
        let save = out.find("config.DB.Save(&user)").unwrap();
        assert!(first < bind && bind < save);
    }

    #[test]
    fn test_delete_confirms_with_model_name() {
        let out = handler("/users/{id}", "DELETE", "DeleteUser");
        assert!(out.contains("config.DB.Delete(&user, c.Param(\"id\")).Error"));
        assert!(out.contains(r#"c.JSON(http.StatusOK, gin.H{"message": "User deleted"})"#));
    }

    #[test]
    fn test_model_named_like_a_package_does_not_shadow_it() {
        let out = Route::new("/configs/{id}", "GET", "GetConfig", "Config").to_go_decl();
        assert!(out.contains("\tvar configRecord models.Config\n"));
        assert!(out.contains("config.DB.First(&configRecord, c.Param(\"id\")).Error"));
    }

    #[test]
    fn test_unknown_method_has_empty_body() {
        assert_eq!(
            handler("/users", "PATCH", "PatchUser"),
            "func PatchUser(c *gin.Context) {\n}"
        );
        assert_eq!(
            handler("/users", "get", "GetUsers"),
            "func GetUsers(c *gin.Context) {\n}"
        );
    }

    #[test]
    fn test_controller_file_per_model() {
        let schema = load_schema_str(
            r#"
models:
  User: {Name: string}
  Post: {Title: string}
routes:
  - {path: /users, method: GET, controller: GetUsers, model: User}
  - {path: /posts, method: GET, controller: GetPosts, model: Post}
  - {path: "/users/{id}", method: GET, controller: GetUser, model: User}
  - {path: /tags, method: GET, controller: GetTags, model: Tag}
"#,
        )
        .unwrap();
        let mut out = Vec::new();
        gen_controller_go(&schema, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out.matches("package controllers").count(), 2);
        assert!(out.contains("\t\"my-crud-api/config\"\n\t\"my-crud-api/models\"\n"));
        let get_users = out.find("func GetUsers").unwrap();
        let get_user = out.find("func GetUser(").unwrap();
        assert!(get_users < get_user);
        // dangling model reference produces no handler
        assert!(!out.contains("GetTags"));
    }

    #[test]
    fn test_model_without_routes_gets_bare_controller() {
        let out = render_controller_go(&GenConfig::default(), Vec::<&Route>::new());
        assert!(out.starts_with("package controllers\n\nimport (\n"));
        assert!(!out.contains("func "));
    }
}
