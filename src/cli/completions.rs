use crate::cert::{CertificateColumn, SharePlatform};
use crate::cli::args::Cli;
use crate::utils::errors::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

const APP_NAME: &str = "relcert";

pub fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout();
    write_completions(shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write the completion script for `shell`; bash also completes platforms and columns
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();

    if !matches!(shell, Shell::Bash) {
        generate(shell, &mut cmd, APP_NAME, out);
        return Ok(());
    }

    let platforms = SharePlatform::KNOWN.join(" ");
    let columns = CertificateColumn::NAMES.join(" ");

    writeln!(out, "# Enhanced completion for relcert share platforms and columns")?;
    write!(
        out,
        r#"
_relcert_override() {{
    local cur prev words cword
    _init_completion || return

    case "$prev" in
        "--platform"|"-p")
            COMPREPLY=($(compgen -W "{platforms}" -- "${{cur}}"))
            return 0
            ;;
        "--columns")
            local prefix="" current_word="${{cur}}"
            if [[ "$current_word" == +* ]]; then
                prefix="+"
                current_word="${{current_word:1}}"
            fi
            if [[ "$current_word" == *,* ]]; then
                prefix="${{prefix}}${{current_word%,*}},"
                current_word="${{current_word##*,}}"
            fi
            local word_list=""
            for col in {columns}; do
                if [[ "$col" == "$current_word"* ]]; then
                    word_list="$word_list ${{prefix}}${{col}}"
                fi
            done
            COMPREPLY=($(compgen -W "$word_list" -- "${{cur}}"))
            return 0
            ;;
    esac

    # Fall back to the generated completion
    _relcert "$@"
}}

"#
    )?;

    generate(shell, &mut cmd, APP_NAME, out);

    writeln!(out)?;
    writeln!(out, "# Override the completion function")?;
    writeln!(out, "complete -F _relcert_override {APP_NAME}")?;
    Ok(())
}
