use maud::{html, Markup, DOCTYPE};

use crate::models::Todo;

fn layout(title: &str, description: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                meta name="description" content=(description);
                script src="https://cdn.tailwindcss.com" {}
            }
            body class="bg-gray-100 font-sans leading-normal tracking-normal" {
                (body)
            }
        }
    }
}

pub fn home_page(message: Option<&str>) -> Markup {
    layout("Todo App", "Welcome to the Todo App!", html! {
        div class="max-w-4xl mx-auto py-12" {
            h1 class="text-4xl font-bold text-center mb-8" { "Welcome to Todo App" }
            div class="bg-white shadow-lg rounded-lg p-8 mb-8" {
                h2 class="text-2xl font-semibold mb-4" { "Get Started" }
                p class="text-gray-600 mb-6" {
                    "A simple todo application. Add tasks, check them off, delete the rest."
                }
                div class="space-y-4" {
                    (feature("Create Todos", "Add new tasks to your todo list"))
                    (feature("Mark Complete", "Check off tasks as you complete them"))
                    (feature("Delete Todos", "Remove tasks you no longer need"))
                }
                div class="mt-8" {
                    a href="/todos"
                        class="inline-block bg-blue-500 text-white px-6 py-3 rounded-lg hover:bg-blue-600 transition-colors" {
                        "Go to Todos →"
                    }
                }
            }
            @if let Some(message) = message {
                div class="bg-gray-100 rounded-lg p-4 text-center" {
                    p class="text-sm text-gray-600" { (message) }
                }
            }
        }
    })
}

fn feature(heading: &str, blurb: &str) -> Markup {
    html! {
        div class="flex items-start" {
            span class="text-blue-500 mr-3" { "✓" }
            div {
                h3 class="font-semibold" { (heading) }
                p class="text-gray-600" { (blurb) }
            }
        }
    }
}

pub fn todos_page(todos: &[Todo], error: Option<&str>) -> Markup {
    layout("Todo App", "Manage your todos", html! {
        div class="max-w-2xl mx-auto p-6" {
            h1 class="text-3xl font-bold mb-8" { "Todo List" }
            @if let Some(error) = error {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4" {
                    (error)
                }
            }
            (create_form())
            ul class="space-y-2" {
                @for todo in todos {
                    (todo_item(todo))
                }
            }
            @if todos.is_empty() {
                p class="text-center text-gray-500 mt-8" { "No todos yet. Add one above!" }
            }
        }
    })
}

fn create_form() -> Markup {
    html! {
        form method="post" action="/todos" class="mb-6" {
            input type="hidden" name="intent" value="create";
            div class="flex gap-2" {
                input type="text" name="title" placeholder="Add a new todo..."
                    class="flex-1 px-4 py-2 border rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500";
                button type="submit"
                    class="px-6 py-2 bg-blue-500 text-white rounded-lg hover:bg-blue-600" {
                    "Add"
                }
            }
        }
    }
}

// Each item carries two independent forms: toggling submits the completed
// flag the page was rendered with, deletion just the id.
fn todo_item(todo: &Todo) -> Markup {
    html! {
        li class="flex items-center gap-3 p-3 bg-gray-50 rounded-lg" {
            form method="post" action="/todos" class="flex items-center gap-3 flex-1" {
                input type="hidden" name="intent" value="toggle";
                input type="hidden" name="id" value=(todo.id);
                input type="hidden" name="completed"
                    value=(if todo.completed { "true" } else { "false" });
                button type="submit"
                    class="w-5 h-5 border-2 rounded flex items-center justify-center hover:bg-gray-100" {
                    @if todo.completed { "✓" }
                }
                span class=(if todo.completed { "flex-1 line-through text-gray-500" } else { "flex-1" }) {
                    (todo.title)
                }
            }
            form method="post" action="/todos" {
                input type="hidden" name="intent" value="delete";
                input type="hidden" name="id" value=(todo.id);
                button type="submit" class="text-red-500 hover:text-red-700" { "Delete" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn todo(title: &str, completed: bool) -> Todo {
        Todo {
            id: "abc-123".to_string(),
            title: title.to_string(),
            completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let page = todos_page(&[], None).into_string();
        assert!(page.contains("No todos yet. Add one above!"));
    }

    #[test]
    fn error_banner_renders_when_present() {
        let page = todos_page(&[], Some("Title is required")).into_string();
        assert!(page.contains("Title is required"));

        let page = todos_page(&[], None).into_string();
        assert!(!page.contains("Title is required"));
    }

    #[test]
    fn completed_todo_is_struck_through() {
        let page = todos_page(&[todo("done thing", true)], None).into_string();
        assert!(page.contains("line-through"));
        assert!(page.contains(r#"name="completed" value="true""#));

        let page = todos_page(&[todo("open thing", false)], None).into_string();
        assert!(!page.contains("line-through"));
        assert!(page.contains(r#"name="completed" value="false""#));
    }

    #[test]
    fn item_forms_carry_intent_and_id() {
        let page = todos_page(&[todo("task", false)], None).into_string();
        assert!(page.contains(r#"name="intent" value="create""#));
        assert!(page.contains(r#"name="intent" value="toggle""#));
        assert!(page.contains(r#"name="intent" value="delete""#));
        assert!(page.contains(r#"name="id" value="abc-123""#));
    }

    #[test]
    fn home_page_shows_optional_message() {
        let page = home_page(Some("hello from the environment")).into_string();
        assert!(page.contains("hello from the environment"));

        let page = home_page(None).into_string();
        assert!(page.contains("Welcome to Todo App"));
    }

    #[test]
    fn each_page_carries_its_own_description() {
        let page = home_page(None).into_string();
        assert!(page.contains(r#"name="description" content="Welcome to the Todo App!""#));

        let page = todos_page(&[], None).into_string();
        assert!(page.contains(r#"name="description" content="Manage your todos""#));
    }
}
