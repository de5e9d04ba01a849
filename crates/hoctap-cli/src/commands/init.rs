//! The `hoctap init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("hoctap.toml").exists() {
        println!("hoctap.toml already exists, skipping.");
    } else {
        std::fs::write("hoctap.toml", SAMPLE_CONFIG)?;
        println!("Created hoctap.toml");
    }

    std::fs::create_dir_all("quiz-sets")?;
    let example_path = std::path::Path::new("quiz-sets/example.toml");
    if example_path.exists() {
        println!("quiz-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ_SET)?;
        println!("Created quiz-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit hoctap.toml with your backend URL");
    println!("  2. Run: hoctap validate quiz-sets/example.toml");
    println!("  3. Run: hoctap quiz quiz-sets/example.toml");
    println!("  4. Run: hoctap login <email>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# hoctap configuration

api_base_url = "http://localhost:5000/api"
timeout_secs = 30
poll_interval_secs = 60
# session_file = "/home/me/.config/hoctap/session.json"

# Study assistant. Remove this section to disable `hoctap chat`.
[chat]
api_key = "${HOCTAP_CHAT_KEY}"
model = "gemini-1.5-flash"
"#;

const EXAMPLE_QUIZ_SET: &str = r#"[quiz_set]
id = "example"
name = "Ví dụ"
description = "Bộ câu hỏi mẫu để bắt đầu"

[[questions]]
content = "Hàng hóa có mấy thuộc tính?"
options = ["Một", "Hai", "Ba"]
correct_answer = "Hai"
explanation = "Giá trị sử dụng và giá trị."

[[questions]]
content = "Theo chủ nghĩa duy vật biện chứng, cái gì quyết định ý thức?"
options = ["Vật chất", "Tinh thần", "Ý chí"]
correct_answer = "Vật chất"
"#;
