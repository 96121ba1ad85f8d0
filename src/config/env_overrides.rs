use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("NATE_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("NATE_MODEL")
            && !model.is_empty()
        {
            self.model = model;
        }

        if let Ok(url) = std::env::var("NATE_API_URL")
            && !url.is_empty()
        {
            self.api_url = url;
        }
    }
}
