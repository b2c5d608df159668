use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    infinidat-tools completions bash > ~/.bash_completion.d/infinidat-tools\n\n\
                  Generate zsh completions:\n    infinidat-tools completions zsh > ~/.zfunc/_infinidat-tools\n\n\
                  Generate fish completions:\n    infinidat-tools completions fish > ~/.config/fish/completions/infinidat-tools.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
